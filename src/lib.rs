//! shorts-relay - download a video and republish it as a YouTube Short.
//!
//! Hexagonal Architecture:
//! - domain/: Titles, video metadata and publish outcomes
//! - ports/: Trait definitions (counter, credentials, source, publisher)
//! - adapters/: Concrete implementations (counter file, HTTP, YouTube API)
//! - application/: The publish pipeline
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use application::publish::PublishService;
pub use config::AppConfig;
pub use error::PublishError;
