use crate::config::ClientConfig;
use crate::error::ExtractError;
use crate::upload::types::{ExtractionResult, ProgressUpdate, SelectedFile};
use crate::utils::video_types::VideoTypes;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

/// Read size for the streamed body; one progress callback per chunk.
const UPLOAD_CHUNK_BYTES: usize = 256 * 1024;

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct HealthBody {
    status: String,
}

/// Talks to the extraction service.
#[derive(Clone, Debug)]
pub struct ExtractionClient {
    client: Client,
    config: ClientConfig,
}

impl ExtractionClient {
    pub fn new(config: ClientConfig) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Uploads `file` as the `video` field of a multipart form.
    ///
    /// The body is streamed from disk; `on_progress` sees the running byte
    /// count after every chunk handed to the transport.
    pub async fn extract<F>(
        &self,
        file: &SelectedFile,
        mut on_progress: F,
    ) -> Result<ExtractionResult, ExtractError>
    where
        F: FnMut(ProgressUpdate) + Send + Sync + 'static,
    {
        let handle = tokio::fs::File::open(&file.path).await?;
        let total = handle.metadata().await?.len();

        let mut loaded = 0u64;
        let stream = ReaderStream::with_capacity(handle, UPLOAD_CHUNK_BYTES).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                loaded += bytes.len() as u64;
                on_progress(ProgressUpdate { loaded, total });
            }
            chunk
        });

        let part = Part::stream_with_length(Body::wrap_stream(stream), total)
            .file_name(file.name.clone())
            .mime_str(VideoTypes::mime_type(&file.path))?;
        let form = Form::new().part("video", part);

        let url = self.config.extract_url();
        info!("Uploading '{}' ({} bytes) to {}", file.name, total, url);

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            warn!(
                "Extraction of '{}' failed with status {}: {:?}",
                file.name, status, message
            );
            return Err(ExtractError::Application {
                status: status.as_u16(),
                message,
            });
        }

        let result: ExtractionResult = serde_json::from_slice(&body)?;
        info!(
            "Extraction of '{}' finished: {} frames, download id {}",
            file.name, result.frame_count, result.download_id
        );
        Ok(result)
    }

    /// `true` when the service reports itself healthy.
    pub async fn health(&self) -> Result<bool, ExtractError> {
        let url = self.config.health_url();
        debug!("Probing {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.config.health_timeout)
            .send()
            .await?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let body = response.bytes().await?;
        let health: HealthBody = serde_json::from_slice(&body)?;
        Ok(health.status == "healthy")
    }
}
