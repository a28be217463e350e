use thiserror::Error;

use crate::types::Phase;

#[derive(Error, Debug)]
pub enum SplitterClientError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Network error: unreadable response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Please select a valid Word document (.doc or .docx)")]
    UnsupportedFileType { name: String },

    #[error("File size exceeds 50MB limit")]
    FileTooLarge { size: u64 },

    #[error("{reason}")]
    Validation { reason: String },

    #[error("Please paste some data first")]
    NoPasteData,

    #[error("No valid data found")]
    NoValidPasteData,

    #[error("Failed to import data. Errors: {}", .errors.join("; "))]
    PasteImport { errors: Vec<String> },

    #[error("Error: {message}")]
    Server { message: String },

    #[error("No document has been uploaded")]
    NoSession,

    #[error("Unknown split row: {id}")]
    UnknownRow { id: u64 },

    #[error("Operation not available in {actual:?} phase (expected {expected:?})")]
    UnexpectedPhase { expected: Phase, actual: Phase },

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl SplitterClientError {
    /// Transport-level failures, reported apart from server-side errors.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            SplitterClientError::Network(_) | SplitterClientError::InvalidResponse(_)
        )
    }

    /// Rejections raised before any request leaves the client.
    pub fn is_client_validation(&self) -> bool {
        matches!(
            self,
            SplitterClientError::UnsupportedFileType { .. }
                | SplitterClientError::FileTooLarge { .. }
                | SplitterClientError::Validation { .. }
                | SplitterClientError::NoPasteData
                | SplitterClientError::NoValidPasteData
                | SplitterClientError::PasteImport { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SplitterClientError>;
