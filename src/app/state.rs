use crate::config::ClientConfig;
use crate::error::ValidationError;
use crate::upload::{BackendHealth, ExtractionResult, SelectedFile, UploadEvent, MAX_UPLOAD_BYTES};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadState {
    pub is_uploading: bool,
    pub progress_percent: u8,
}

/// An accepted submit: the worker tags every event it sends with `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: u64,
    pub file: SelectedFile,
}

#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub selected_file: Option<SelectedFile>,
    pub upload: UploadState,
    pub result: Option<ExtractionResult>,
    pub error_message: Option<String>,
    pub backend_health: BackendHealth,
    active_submission: Option<u64>,
    next_submission: u64,
}

impl ClientState {
    pub fn select_file(&mut self, file: SelectedFile) {
        if self.upload.is_uploading {
            debug!("Ignoring file selection while an upload is running");
            return;
        }

        if file.size_bytes > MAX_UPLOAD_BYTES {
            warn!("Rejected '{}' ({} bytes)", file.name, file.size_bytes);
            self.reject_selection(ValidationError::FileTooLarge);
            return;
        }

        info!("Selected '{}' ({} bytes)", file.name, file.size_bytes);
        self.selected_file = Some(file);
        self.error_message = None;
        self.result = None;
    }

    /// Drops the current selection and shows why.
    pub fn reject_selection(&mut self, err: ValidationError) {
        if self.upload.is_uploading {
            return;
        }
        self.selected_file = None;
        self.set_error(err.to_string());
    }

    /// Starts a submission, or returns `None` when there is nothing to send
    /// or one is already in flight.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.upload.is_uploading {
            debug!("Submit ignored: upload already in flight");
            return None;
        }

        let Some(file) = self.selected_file.clone() else {
            self.set_error(ValidationError::NoFileSelected.to_string());
            return None;
        };

        self.next_submission += 1;
        let id = self.next_submission;
        self.active_submission = Some(id);
        self.upload = UploadState {
            is_uploading: true,
            progress_percent: 0,
        };
        self.error_message = None;

        Some(Submission { id, file })
    }

    pub fn is_active(&self, submission_id: u64) -> bool {
        self.active_submission == Some(submission_id)
    }

    pub fn apply(&mut self, submission_id: u64, event: UploadEvent) {
        if !self.is_active(submission_id) {
            debug!("Dropping event for stale submission {}", submission_id);
            return;
        }

        match event {
            UploadEvent::Progress(update) => {
                self.upload.progress_percent = update.percent();
            }
            UploadEvent::Completed(result) => {
                self.finish();
                self.error_message = None;
                self.result = Some(result);
            }
            UploadEvent::Failed(message) => {
                self.finish();
                self.set_error(message);
            }
            UploadEvent::Cancelled => {
                info!("Submission {} cancelled", submission_id);
                self.finish();
            }
        }
    }

    /// The archive URL, once a result with a download token exists.
    pub fn download_url(&self, config: &ClientConfig) -> Option<String> {
        self.result
            .as_ref()
            .filter(|r| !r.download_id.is_empty())
            .map(|r| config.download_url(&r.download_id))
    }

    pub fn reset(&mut self) {
        let next_submission = self.next_submission;
        let backend_health = std::mem::take(&mut self.backend_health);
        *self = ClientState::default();
        self.next_submission = next_submission;
        self.backend_health = backend_health;
    }

    fn finish(&mut self) {
        self.active_submission = None;
        self.upload = UploadState::default();
    }

    fn set_error(&mut self, message: String) {
        self.result = None;
        self.error_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FALLBACK_ERROR_MESSAGE;
    use crate::upload::ProgressUpdate;
    use std::path::PathBuf;

    fn file(size_bytes: u64) -> SelectedFile {
        SelectedFile {
            name: "clip.mp4".to_string(),
            size_bytes,
            path: PathBuf::from("clip.mp4"),
        }
    }

    fn done() -> ExtractionResult {
        ExtractionResult {
            download_id: "abc123".to_string(),
            frame_count: 42,
            message: "Done".to_string(),
        }
    }

    #[test]
    fn oversized_file_is_rejected() {
        let mut state = ClientState::default();
        state.select_file(file(10));
        state.select_file(file(MAX_UPLOAD_BYTES + 1));

        assert!(state.selected_file.is_none());
        assert_eq!(
            state.error_message.as_deref(),
            Some("File size exceeds 500MB limit")
        );
    }

    #[test]
    fn file_at_limit_is_accepted_and_clears_previous_outcome() {
        let mut state = ClientState::default();
        state.error_message = Some("old".to_string());
        state.select_file(file(MAX_UPLOAD_BYTES));
        assert_eq!(state.selected_file, Some(file(MAX_UPLOAD_BYTES)));
        assert!(state.error_message.is_none());

        let submission = state.begin_submit().unwrap();
        state.apply(submission.id, UploadEvent::Completed(done()));
        state.select_file(file(0));
        assert!(state.result.is_none());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn unreadable_selection_replaces_previous_one() {
        let mut state = ClientState::default();
        state.select_file(file(10));
        state.reject_selection(ValidationError::UnreadableFile);

        assert!(state.selected_file.is_none());
        assert_eq!(
            state.error_message.as_deref(),
            Some("Could not read the selected file")
        );
        assert!(state.begin_submit().is_none());
    }

    #[test]
    fn submit_without_file_sets_error() {
        let mut state = ClientState::default();
        assert!(state.begin_submit().is_none());
        assert_eq!(
            state.error_message.as_deref(),
            Some("Please select a video file")
        );
        assert!(!state.upload.is_uploading);
    }

    #[test]
    fn successful_submit_stores_result() {
        let mut state = ClientState::default();
        state.select_file(file(200));
        let submission = state.begin_submit().unwrap();
        assert_eq!(submission.file, file(200));
        assert!(state.upload.is_uploading);

        state.apply(submission.id, UploadEvent::Completed(done()));

        assert_eq!(state.result, Some(done()));
        assert_eq!(state.upload, UploadState::default());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn failures_set_error_and_return_to_idle() {
        let mut state = ClientState::default();
        state.select_file(file(200));

        let first = state.begin_submit().unwrap();
        state.apply(first.id, UploadEvent::Failed("Invalid format".to_string()));
        assert_eq!(state.error_message.as_deref(), Some("Invalid format"));
        assert_eq!(state.upload, UploadState::default());

        let second = state.begin_submit().unwrap();
        assert!(state.error_message.is_none());
        state.apply(
            second.id,
            UploadEvent::Failed(FALLBACK_ERROR_MESSAGE.to_string()),
        );
        assert_eq!(state.error_message.as_deref(), Some(FALLBACK_ERROR_MESSAGE));
        assert!(state.selected_file.is_some());
    }

    #[test]
    fn progress_follows_callbacks() {
        let mut state = ClientState::default();
        state.select_file(file(200));
        let submission = state.begin_submit().unwrap();

        let mut shown = Vec::new();
        for (loaded, total) in [(50, 200), (200, 200)] {
            state.apply(
                submission.id,
                UploadEvent::Progress(ProgressUpdate { loaded, total }),
            );
            shown.push(state.upload.progress_percent);
        }
        assert_eq!(shown, vec![25, 100]);

        // Out-of-order delivery just shows the latest value.
        state.apply(
            submission.id,
            UploadEvent::Progress(ProgressUpdate {
                loaded: 100,
                total: 200,
            }),
        );
        assert_eq!(state.upload.progress_percent, 50);
    }

    #[test]
    fn overlapping_submit_is_ignored() {
        let mut state = ClientState::default();
        state.select_file(file(200));
        let first = state.begin_submit().unwrap();
        assert!(state.begin_submit().is_none());
        assert!(state.is_active(first.id));
        assert!(state.error_message.is_none());
    }

    #[test]
    fn stale_events_are_dropped() {
        let mut state = ClientState::default();
        state.select_file(file(200));
        let first = state.begin_submit().unwrap();
        state.reset();

        state.apply(first.id, UploadEvent::Completed(done()));
        assert!(state.result.is_none());

        state.select_file(file(200));
        let second = state.begin_submit().unwrap();
        assert_ne!(first.id, second.id);
        state.apply(first.id, UploadEvent::Failed("late".to_string()));
        assert!(state.error_message.is_none());
        assert!(state.upload.is_uploading);
    }

    #[test]
    fn cancel_returns_to_idle_without_error() {
        let mut state = ClientState::default();
        state.select_file(file(200));
        let submission = state.begin_submit().unwrap();
        state.apply(
            submission.id,
            UploadEvent::Progress(ProgressUpdate {
                loaded: 20,
                total: 200,
            }),
        );
        state.apply(submission.id, UploadEvent::Cancelled);

        assert_eq!(state.upload, UploadState::default());
        assert!(state.error_message.is_none());
        assert!(state.selected_file.is_some());
    }

    #[test]
    fn download_url_requires_token() {
        let config = ClientConfig::default();
        let mut state = ClientState::default();
        assert!(state.download_url(&config).is_none());

        state.result = Some(ExtractionResult {
            download_id: String::new(),
            ..done()
        });
        assert!(state.download_url(&config).is_none());

        state.result = Some(done());
        assert_eq!(
            state.download_url(&config).as_deref(),
            Some("http://localhost/api/download/abc123")
        );
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut state = ClientState::default();
        state.select_file(file(200));
        let submission = state.begin_submit().unwrap();
        state.apply(submission.id, UploadEvent::Completed(done()));
        state.reset();

        assert!(state.selected_file.is_none());
        assert!(state.result.is_none());
        assert!(state.error_message.is_none());
        assert_eq!(state.upload, UploadState::default());

        state.select_file(file(200));
        let submission = state.begin_submit().unwrap();
        state.apply(submission.id, UploadEvent::Failed("boom".to_string()));
        state.reset();
        assert!(state.error_message.is_none());
        assert_eq!(state.upload, UploadState::default());
    }
}
