//! Inbound HTTP API: `POST /upload`.

use crate::application::publish::PublishService;
use crate::domain::upload::UploadRequest;
use crate::error::PublishError;
use crate::ports::counter::CounterStore;
use crate::ports::publisher::VideoPublisher;
use crate::ports::source::VideoSource;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

pub const API_KEY_HEADER: &str = "x-api-key";

pub struct AppState<S, C, P> {
    api_key: Option<Arc<str>>,
    service: Arc<PublishService<S, C, P>>,
}

impl<S, C, P> AppState<S, C, P> {
    /// With no `api_key` configured every request is rejected.
    pub fn new(api_key: Option<String>, service: Arc<PublishService<S, C, P>>) -> Self {
        Self {
            api_key: api_key.map(Arc::from),
            service,
        }
    }

    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let provided = headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());
        match (self.api_key.as_deref(), provided) {
            (Some(expected), Some(provided)) => expected == provided,
            _ => false,
        }
    }
}

impl<S, C, P> Clone for AppState<S, C, P> {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            service: self.service.clone(),
        }
    }
}

pub fn router<S, C, P>(state: AppState<S, C, P>) -> Router
where
    S: VideoSource + 'static,
    C: CounterStore + 'static,
    P: VideoPublisher + 'static,
{
    Router::new()
        .route("/upload", post(upload_video::<S, C, P>))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub fact_number: u64,
    pub video_id: String,
    pub youtube_url: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    error: String,
}

#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    InvalidPayload,
    Publish(PublishError),
}

impl From<PublishError> for ApiError {
    fn from(err: PublishError) -> Self {
        ApiError::Publish(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    success: None,
                    error: "Unauthorized".to_string(),
                },
            ),
            ApiError::InvalidPayload => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    success: Some(false),
                    error: "Missing video_url or description".to_string(),
                },
            ),
            ApiError::Publish(err) => {
                error!(error = %err, "Upload request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        success: Some(false),
                        error: err.to_string(),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Extract a non-empty string field; anything else counts as missing.
fn required_str(payload: &Value, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn parse_request(body: &[u8]) -> Option<UploadRequest> {
    let payload: Value = serde_json::from_slice(body).ok()?;
    Some(UploadRequest {
        video_url: required_str(&payload, "video_url")?,
        description: required_str(&payload, "description")?,
    })
}

async fn upload_video<S, C, P>(
    State(state): State<AppState<S, C, P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>, ApiError>
where
    S: VideoSource + 'static,
    C: CounterStore + 'static,
    P: VideoPublisher + 'static,
{
    if !state.is_authorized(&headers) {
        return Err(ApiError::Unauthorized);
    }

    let request = parse_request(&body).ok_or(ApiError::InvalidPayload)?;
    let outcome = state.service.clone().publish_detached(request).await?;

    Ok(Json(UploadResponse {
        success: true,
        fact_number: outcome.fact_number,
        youtube_url: outcome.video.shorts_url(),
        video_id: outcome.video.id,
    }))
}
