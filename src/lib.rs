//! # Docx Splitter Client
//!
//! Client side of a document-splitting service: upload a Word document,
//! describe the PDFs to cut from it as page ranges, and fetch the resulting
//! ZIP archive.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use docx_splitter::{ClientConfig, HttpSplitterClient, SplitterController, UploadCandidate};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://127.0.0.1:5001", PathBuf::from("./output"), false)?;
//!     let mut controller = SplitterController::new(HttpSplitterClient::new(config));
//!
//!     // Upload and seed the table with one full-range row
//!     controller.upload(UploadCandidate::from_path("report.docx").await?).await?;
//!
//!     // Replace it with rows pasted from a spreadsheet
//!     controller.set_paste_data("intro\t1\t3\nbody\t4\t10");
//!     controller.apply_pasted_data()?;
//!
//!     let outcome = controller.submit().await?;
//!     println!("{} ({} bytes)", outcome.headline, outcome.archive.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export main types and services for easier usage
pub use config::{ClientConfig, ClientDefaults, CLIENT_DEFAULTS};
pub use error::{Result, SplitterClientError};
pub use services::{
    ArchiveWriter, DocumentUpload, HttpSplitterClient, ParsedPaste, PasteParser,
    SplitTable, SplitterBackend, SplitterController, SubmissionValidator, UploadCandidate,
    UploadValidator,
};
pub use types::{
    LineError, ParseResult, Phase, ProcessRequest, ResultItem, ResultStatus, RowId,
    SessionState, SplitEntry, SplitRequest, StatusKind, StatusMessage, SubmitOutcome,
    UploadAccepted,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paste_then_validate_round() {
        let parsed = PasteParser::new()
            .parse("a.pdf\t1\t5\nb.pdf\t6\t12", 10)
            .unwrap();

        let mut table = SplitTable::new();
        for entry in parsed.entries {
            table.push(entry);
        }

        let splits = SubmissionValidator::validate(&table, 10).unwrap();
        assert_eq!(
            splits,
            vec![SplitRequest {
                filename: "a.pdf".to_string(),
                start_page: 1,
                end_page: 5,
            }]
        );
    }

    #[test]
    fn process_request_wire_shape() {
        let request = ProcessRequest {
            session_id: "report.docx".to_string(),
            splits: vec![SplitRequest {
                filename: "a.pdf".to_string(),
                start_page: 1,
                end_page: 2,
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "session_id": "report.docx",
                "splits": [{"filename": "a.pdf", "start_page": 1, "end_page": 2}]
            })
        );
    }

    #[test]
    fn default_config_points_at_local_server() {
        let config = ClientConfig::default();
        assert_eq!(config.upload_url().unwrap().as_str(), "http://127.0.0.1:5001/upload");
        assert_eq!(CLIENT_DEFAULTS.archive_name, "split_pdfs.zip");
    }
}
