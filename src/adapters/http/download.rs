use crate::error::DownloadError;
use crate::ports::source::VideoSource;
use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio_util::io::StreamReader;
use tracing::info;

/// VideoSource that fetches videos over HTTP(S) with a streaming GET.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VideoSource for HttpDownloader {
    async fn fetch(&self, source_url: &str, dest_path: &Path) -> Result<(), DownloadError> {
        info!(url = source_url, "Starting download");

        let response = self.client.get(source_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status.as_u16()));
        }

        let written = stream_to_file(dest_path, response.bytes_stream()).await?;

        info!(path = %dest_path.display(), bytes = written, "Video saved");
        Ok(())
    }
}

/// Save a `Stream` of byte chunks to a file, truncating it first.
/// Returns the number of bytes written.
pub async fn stream_to_file<S, E>(path: &Path, stream: S) -> io::Result<u64>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let body_with_io_error = stream.map_err(io::Error::other);
    let body_reader = StreamReader::new(body_with_io_error);
    futures::pin_mut!(body_reader);

    let mut file = BufWriter::new(File::create(path).await?);
    let written = tokio::io::copy(&mut body_reader, &mut file).await?;
    file.flush().await?;

    Ok(written)
}
