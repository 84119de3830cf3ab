//! Error types shared by ports, adapters and the publish service.

use thiserror::Error;

/// Server-side configuration problems detected at request time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Server misconfiguration: Missing YouTube API credentials")]
    MissingCredentials,
}

/// Failure to materialize the remote video on local storage.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Request failed with status code {0}")]
    Status(u16),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Failure while authenticating against or uploading to the video platform.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Auth(String),
    /// Error reported by the API itself; carries the platform's message.
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Platform(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Upload response did not contain a video id")]
    MissingId,
}

/// Counter file could not be read, parsed or written.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("Counter overflowed at {0}")]
    Overflow(u64),
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Upload task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
