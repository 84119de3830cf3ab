//! HTTP adapters: the outbound downloader and the inbound `/upload` API.

pub mod download;
pub mod server;

pub use download::HttpDownloader;
pub use server::{router, AppState};
