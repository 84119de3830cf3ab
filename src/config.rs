//! Configuration loaded once at startup from the environment.

use crate::error::ConfigError;
use std::env;
use std::path::PathBuf;

/// Configuration for the upload service.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Shared secret expected in the `x-api-key` header
    pub api_key: Option<String>,
    /// OAuth credentials of the publishing account
    pub youtube: YouTubeConfig,
    /// JSON file holding the fact counter
    pub counter_file: PathBuf,
    /// Scratch file the downloaded video is written to
    pub video_path: PathBuf,
}

/// OAuth client configuration. Each value may be missing; the service
/// only refuses to publish, it still starts.
#[derive(Clone, Debug, Default)]
pub struct YouTubeConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
}

/// A complete credential set, available only when every value is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl YouTubeConfig {
    pub fn credentials(&self) -> Result<OAuthCredentials, ConfigError> {
        match (&self.client_id, &self.client_secret, &self.refresh_token) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => Ok(OAuthCredentials {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                refresh_token: refresh_token.clone(),
            }),
            _ => Err(ConfigError::MissingCredentials),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, reading `.env` first.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            addr: var("ADDR").unwrap_or_else(|| String::from("0.0.0.0")),
            port: var("PORT").unwrap_or_else(|| String::from("3000")),
            api_key: var("API_KEY"),
            youtube: YouTubeConfig {
                client_id: var("YOUTUBE_CLIENT_ID"),
                client_secret: var("YOUTUBE_CLIENT_SECRET"),
                refresh_token: var("YOUTUBE_REFRESH_TOKEN"),
            },
            counter_file: var("COUNTER_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./counter.json")),
            video_path: var("VIDEO_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/tmp/video.mp4")),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}
