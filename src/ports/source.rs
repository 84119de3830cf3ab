use crate::error::DownloadError;
use async_trait::async_trait;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Download `source_url` to `dest_path`, replacing any existing file.
    /// Returns once every byte has been flushed to disk.
    async fn fetch(&self, source_url: &str, dest_path: &Path) -> Result<(), DownloadError>;
}
