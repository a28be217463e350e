use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-issued identity of the uploaded document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionState {
    pub session_id: Option<String>,
    pub total_pages: u32,
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        self.session_id.is_some()
    }

    pub fn clear(&mut self) {
        *self = SessionState::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitEntry {
    pub filename: String,
    pub start_page: u32,
    pub end_page: u32,
}

impl SplitEntry {
    pub fn new(filename: impl Into<String>, start_page: u32, end_page: u32) -> Self {
        Self {
            filename: filename.into(),
            start_page,
            end_page,
        }
    }
}

/// Stable handle for a row of the split table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Upload,
    Configure,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.line, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub imported: usize,
    pub errors: Vec<LineError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Body of a successful `/upload` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAccepted {
    pub session_id: String,
    pub page_count: u32,
    pub message: String,
}

/// Raw `/upload` reply; success and failure share one shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    pub session_id: Option<String>,
    pub page_count: Option<u32>,
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}

/// One split as the server expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRequest {
    pub filename: String,
    pub start_page: u32,
    pub end_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub session_id: String,
    pub splits: Vec<SplitRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub filename: String,
    pub status: ResultStatus,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub archive_name: String,
    pub archive: Vec<u8>,
    pub headline: String,
    pub results: Vec<ResultItem>,
    pub completed_at: DateTime<Utc>,
}
