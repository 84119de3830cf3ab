//! Ports - Trait definitions the publish pipeline is written against.

pub mod counter;
pub mod credentials;
pub mod publisher;
pub mod source;
