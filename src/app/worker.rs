use crate::upload::{BackendHealth, ExtractionClient, ProgressUpdate, SelectedFile, UploadEvent};
use tokio::sync::oneshot;
use tracing::{info, warn};

/// Runs one submission to its terminal event.
///
/// Firing or dropping `cancel` aborts the request and yields `Cancelled`.
pub async fn run_extraction<F>(
    client: &ExtractionClient,
    id: u64,
    file: &SelectedFile,
    mut cancel: oneshot::Receiver<()>,
    on_progress: F,
) -> UploadEvent
where
    F: FnMut(ProgressUpdate) + Send + Sync + 'static,
{
    tokio::select! {
        result = client.extract(file, on_progress) => match result {
            Ok(result) => UploadEvent::Completed(result),
            Err(e) => {
                warn!("Submission {} failed: {}", id, e);
                UploadEvent::Failed(e.user_message())
            }
        },
        _ = &mut cancel => {
            info!("Submission {} aborted", id);
            UploadEvent::Cancelled
        }
    }
}

pub async fn probe_health(client: &ExtractionClient) -> BackendHealth {
    match client.health().await {
        Ok(true) => BackendHealth::Online,
        Ok(false) => BackendHealth::Offline("Service reported unhealthy".to_string()),
        Err(e) => BackendHealth::Offline(e.to_string()),
    }
}
