use super::upload_error;
use crate::domain::upload::{PublishedVideo, VideoMetadata};
use crate::error::{ConfigError, UploadError};
use crate::ports::credentials::CredentialProvider;
use crate::ports::publisher::VideoPublisher;
use async_trait::async_trait;
use google_youtube3::api::{Scope, Video, VideoSnippet, VideoStatus};
use google_youtube3::hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use google_youtube3::hyper_util::client::legacy::connect::{Connect, HttpConnector};
use google_youtube3::hyper_util::client::legacy::Client;
use google_youtube3::hyper_util::rt::TokioExecutor;
use google_youtube3::YouTube;
use std::io;
use std::path::Path;
use tracing::info;

/// Connector used against the real API.
pub fn https_connector() -> io::Result<HttpsConnector<HttpConnector>> {
    Ok(HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build())
}

/// Uploads videos through `videos.insert`, authenticating each call with
/// a token from the credential provider.
pub struct YouTubeUploader<C, K = HttpsConnector<HttpConnector>> {
    connector: K,
    credentials: C,
    root_url: Option<String>,
}

impl<C, K> YouTubeUploader<C, K>
where
    C: CredentialProvider,
    K: Connect + Clone + Send + Sync + 'static,
{
    pub fn new(connector: K, credentials: C) -> Self {
        Self {
            connector,
            credentials,
            root_url: None,
        }
    }

    /// Send requests to another API root, e.g. `http://127.0.0.1:8080/`.
    pub fn with_root_url(mut self, root_url: impl Into<String>) -> Self {
        self.root_url = Some(root_url.into());
        self
    }
}

fn video_resource(metadata: VideoMetadata) -> Video {
    Video {
        snippet: Some(VideoSnippet {
            title: Some(metadata.snippet.title),
            description: Some(metadata.snippet.description),
            category_id: Some(metadata.snippet.category_id),
            ..Default::default()
        }),
        status: Some(VideoStatus {
            privacy_status: Some(metadata.status.privacy_status),
            self_declared_made_for_kids: Some(metadata.status.self_declared_made_for_kids),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[async_trait]
impl<C, K> VideoPublisher for YouTubeUploader<C, K>
where
    C: CredentialProvider,
    K: Connect + Clone + Send + Sync + 'static,
{
    fn ready(&self) -> Result<(), ConfigError> {
        self.credentials.ensure_configured()
    }

    async fn publish(
        &self,
        file_path: &Path,
        title: &str,
        description: &str,
    ) -> Result<PublishedVideo, UploadError> {
        let token = self.credentials.authorize().await?;

        let client = Client::builder(TokioExecutor::new()).build(self.connector.clone());
        let mut hub = YouTube::new(client, token.0);
        if let Some(root_url) = &self.root_url {
            hub.root_url(root_url.clone());
        }

        info!(title, "Starting video upload");

        let video = video_resource(VideoMetadata::shorts(title, description));
        let media_type = mime_guess::from_path(file_path).first_or_octet_stream();
        let file = tokio::fs::File::open(file_path).await?.into_std().await;

        let (_response, uploaded) = hub
            .videos()
            .insert(video)
            .add_scope(Scope::Upload)
            .add_part("snippet")
            .add_part("status")
            .upload(file, media_type)
            .await
            .map_err(upload_error)?;

        let id = uploaded.id.ok_or(UploadError::MissingId)?;

        info!(video_id = %id, "Upload successful");
        Ok(PublishedVideo { id })
    }
}
