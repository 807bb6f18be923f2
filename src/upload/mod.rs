mod extractor;
mod types;

pub use extractor::ExtractionClient;
pub use types::{
    BackendHealth, ExtractionResult, ProgressUpdate, SelectedFile, UploadEvent, MAX_UPLOAD_BYTES,
};
