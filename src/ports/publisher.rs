use crate::domain::upload::PublishedVideo;
use crate::error::{ConfigError, UploadError};
use async_trait::async_trait;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoPublisher: Send + Sync {
    /// Whether the publisher has what it needs to authenticate.
    fn ready(&self) -> Result<(), ConfigError>;

    /// Upload a local file as a public Short.
    /// The Shorts hashtag is appended to `description` by the publisher.
    async fn publish(
        &self,
        file_path: &Path,
        title: &str,
        description: &str,
    ) -> Result<PublishedVideo, UploadError>;
}
