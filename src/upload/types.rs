use serde::Deserialize;
use std::path::PathBuf;

pub const MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn from_path(path: PathBuf) -> std::io::Result<Self> {
        let size_bytes = std::fs::metadata(&path)?.len();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Ok(Self {
            name,
            size_bytes,
            path,
        })
    }
}

/// Payload of a successful `POST /extract`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtractionResult {
    pub download_id: String,
    pub frame_count: u64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub loaded: u64,
    pub total: u64,
}

impl ProgressUpdate {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let percent = (self.loaded as f64 * 100.0 / self.total as f64).round();
        percent.clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Progress(ProgressUpdate),
    Completed(ExtractionResult),
    Failed(String),
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BackendHealth {
    #[default]
    Unknown,
    Checking,
    Online,
    Offline(String),
}
