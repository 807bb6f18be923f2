use thiserror::Error;

pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred during extraction";

/// Problems caught locally before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File size exceeds 500MB limit")]
    FileTooLarge,

    #[error("Please select a video file")]
    NoFileSelected,

    #[error("Could not read the selected file")]
    UnreadableFile,
}

/// Failures of a single extraction request.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read video file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse extraction response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Extraction failed with status {status}")]
    Application { status: u16, message: Option<String> },
}

impl ExtractError {
    /// The single line shown to the user. Only a server-provided `error`
    /// field survives; everything else collapses to the fallback text.
    pub fn user_message(&self) -> String {
        match self {
            ExtractError::Application {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}
