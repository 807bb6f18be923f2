use std::path::Path;

/// Extensions offered in the file dialog filter.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

pub const SUPPORTED_FORMAT_NAMES: [&str; 4] = ["MP4", "AVI", "MOV", "MKV"];

pub struct VideoTypes;

impl VideoTypes {
    pub fn is_supported(path: &Path) -> bool {
        Self::extension(path)
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// MIME type sent with the multipart part.
    pub fn mime_type(path: &Path) -> &'static str {
        match Self::extension(path).as_deref() {
            Some("mp4") => "video/mp4",
            Some("avi") => "video/avi",
            Some("mov") => "video/mov",
            Some("mkv") => "video/x-matroska",
            _ => "application/octet-stream",
        }
    }

    fn extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}
