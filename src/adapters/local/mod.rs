//! Local adapters backed by the filesystem.

pub mod counter;

pub use counter::FileCounter;
