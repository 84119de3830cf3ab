//! YouTube Data API v3 adapters.

pub mod oauth;
pub mod upload;

pub use oauth::OAuthCredentialProvider;
pub use upload::YouTubeUploader;

use crate::error::UploadError;
use serde_json::Value;

/// Map a client error onto `UploadError`, keeping the platform's own
/// message (`error.message`) when the API returned one.
fn upload_error(err: google_youtube3::Error) -> UploadError {
    match err {
        google_youtube3::Error::BadRequest(body) => UploadError::Api(api_error_message(&body)),
        google_youtube3::Error::Io(e) => UploadError::Io(e),
        other => UploadError::Platform(other.to_string()),
    }
}

fn api_error_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| body.to_string())
}
