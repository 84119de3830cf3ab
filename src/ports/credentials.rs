use crate::error::{ConfigError, UploadError};
use async_trait::async_trait;

/// Short-lived bearer token for the upload API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Fails when any part of the static credential set is missing.
    fn ensure_configured(&self) -> Result<(), ConfigError>;

    /// Produce a token authorized for video uploads.
    async fn authorize(&self) -> Result<AccessToken, UploadError>;
}
