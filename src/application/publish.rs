use crate::domain::upload::{FactTitle, PublishOutcome, UploadRequest};
use crate::error::PublishError;
use crate::ports::counter::CounterStore;
use crate::ports::publisher::VideoPublisher;
use crate::ports::source::VideoSource;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Runs the download -> mint title -> upload -> cleanup pipeline.
///
/// Every run shares one scratch file and one counter, so runs are
/// serialized behind `pipeline`.
pub struct PublishService<S, C, P> {
    source: S,
    counter: C,
    publisher: P,
    scratch_path: PathBuf,
    pipeline: Mutex<()>,
}

impl<S, C, P> PublishService<S, C, P>
where
    S: VideoSource,
    C: CounterStore,
    P: VideoPublisher,
{
    pub fn new(source: S, counter: C, publisher: P, scratch_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            counter,
            publisher,
            scratch_path: scratch_path.into(),
            pipeline: Mutex::new(()),
        }
    }

    pub async fn publish(&self, request: &UploadRequest) -> Result<PublishOutcome, PublishError> {
        // Refuse before touching the network when credentials are missing.
        self.publisher.ready()?;

        let _guard = self.pipeline.lock().await;

        let result = self.run(request).await;
        self.cleanup().await;
        result
    }

    /// Run `publish` on its own task. The pipeline (cleanup included) then
    /// completes even when the caller's future is dropped, e.g. because
    /// the HTTP client disconnected.
    pub async fn publish_detached(
        self: Arc<Self>,
        request: UploadRequest,
    ) -> Result<PublishOutcome, PublishError>
    where
        S: 'static,
        C: 'static,
        P: 'static,
    {
        tokio::spawn(async move { self.publish(&request).await }).await?
    }

    async fn run(&self, request: &UploadRequest) -> Result<PublishOutcome, PublishError> {
        self.source
            .fetch(&request.video_url, &self.scratch_path)
            .await?;

        let title = FactTitle(self.counter.next().await?);
        info!(fact_number = title.number(), %title, "Minted title");

        let video = self
            .publisher
            .publish(
                &self.scratch_path,
                &title.platform_title(),
                &request.description,
            )
            .await?;

        Ok(PublishOutcome {
            fact_number: title.number(),
            video,
        })
    }

    async fn cleanup(&self) {
        match tokio::fs::try_exists(&self.scratch_path).await {
            Ok(true) => {
                if let Err(e) = tokio::fs::remove_file(&self.scratch_path).await {
                    warn!(path = %self.scratch_path.display(), error = %e, "Failed to remove scratch file");
                }
            }
            Ok(false) => {}
            Err(e) => {
                warn!(path = %self.scratch_path.display(), error = %e, "Failed to check scratch file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::upload::PublishedVideo;
    use crate::error::{ConfigError, DownloadError, StorageError, UploadError};
    use crate::ports::counter::MockCounterStore;
    use crate::ports::publisher::MockVideoPublisher;
    use crate::ports::source::MockVideoSource;
    use tempfile::{tempdir, TempDir};

    fn request() -> UploadRequest {
        UploadRequest {
            video_url: "https://example.com/v.mp4".to_string(),
            description: "A fact".to_string(),
        }
    }

    fn writing_source() -> MockVideoSource {
        let mut source = MockVideoSource::new();
        source
            .expect_fetch()
            .withf(|url, _| url == "https://example.com/v.mp4")
            .times(1)
            .returning(|_, dest| {
                std::fs::write(dest, b"video")?;
                Ok(())
            });
        source
    }

    fn scratch() -> (TempDir, PathBuf) {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("video.mp4");
        (temp_dir, path)
    }

    #[tokio::test]
    async fn test_successful_run() {
        let (_dir, path) = scratch();

        let mut counter = MockCounterStore::new();
        counter.expect_next().times(1).returning(|| Ok(6));

        let mut publisher = MockVideoPublisher::new();
        publisher.expect_ready().returning(|| Ok(()));
        publisher
            .expect_publish()
            .withf(|file, title, description| {
                file.exists() && title == "Daily Fact #6 #Shorts" && description == "A fact"
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(PublishedVideo {
                    id: "abc123".to_string(),
                })
            });

        let service = PublishService::new(writing_source(), counter, publisher, &path);
        let outcome = service.publish(&request()).await.unwrap();

        assert_eq!(outcome.fact_number, 6);
        assert_eq!(outcome.video.id, "abc123");
        assert_eq!(
            outcome.video.shorts_url(),
            "https://www.youtube.com/shorts/abc123"
        );
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_missing_credentials_skips_download() {
        let (_dir, path) = scratch();

        let mut source = MockVideoSource::new();
        source.expect_fetch().times(0);
        let mut counter = MockCounterStore::new();
        counter.expect_next().times(0);
        let mut publisher = MockVideoPublisher::new();
        publisher
            .expect_ready()
            .returning(|| Err(ConfigError::MissingCredentials));
        publisher.expect_publish().times(0);

        let service = PublishService::new(source, counter, publisher, &path);
        let result = service.publish(&request()).await;

        assert!(matches!(result, Err(PublishError::Config(_))));
    }

    #[tokio::test]
    async fn test_download_failure_leaves_counter_untouched() {
        let (_dir, path) = scratch();

        let mut source = MockVideoSource::new();
        source.expect_fetch().times(1).returning(|_, dest| {
            // A partial file from an interrupted transfer.
            std::fs::write(dest, b"partial")?;
            Err(DownloadError::Status(404))
        });
        let mut counter = MockCounterStore::new();
        counter.expect_next().times(0);
        let mut publisher = MockVideoPublisher::new();
        publisher.expect_ready().returning(|| Ok(()));
        publisher.expect_publish().times(0);

        let service = PublishService::new(source, counter, publisher, &path);
        let err = service.publish(&request()).await.unwrap_err();

        assert!(matches!(err, PublishError::Download(_)));
        assert_eq!(err.to_string(), "Request failed with status code 404");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_upload_failure_after_counter_increment() {
        let (_dir, path) = scratch();

        let mut counter = MockCounterStore::new();
        counter.expect_next().times(1).returning(|| Ok(2));
        let mut publisher = MockVideoPublisher::new();
        publisher.expect_ready().returning(|| Ok(()));
        publisher.expect_publish().times(1).returning(|_, _, _| {
            Err(UploadError::Api("quotaExceeded".to_string()))
        });

        let service = PublishService::new(writing_source(), counter, publisher, &path);
        let err = service.publish(&request()).await.unwrap_err();

        assert!(matches!(err, PublishError::Upload(_)));
        assert_eq!(err.to_string(), "quotaExceeded");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_counter_failure_skips_upload() {
        let (_dir, path) = scratch();

        let mut counter = MockCounterStore::new();
        counter.expect_next().times(1).returning(|| {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )))
        });
        let mut publisher = MockVideoPublisher::new();
        publisher.expect_ready().returning(|| Ok(()));
        publisher.expect_publish().times(0);

        let service = PublishService::new(writing_source(), counter, publisher, &path);
        let err = service.publish(&request()).await.unwrap_err();

        assert!(matches!(err, PublishError::Storage(_)));
        assert!(!path.exists());
    }
}
