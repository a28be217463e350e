use crate::config::CLIENT_DEFAULTS;
use crate::error::{Result, SplitterClientError};
use crate::services::backend::SplitterBackend;
use crate::services::paste::PasteParser;
use crate::services::submit::SubmissionValidator;
use crate::services::table::SplitTable;
use crate::services::upload::{UploadCandidate, UploadValidator};
use crate::types::{
    ParseResult, Phase, ProcessRequest, ResultItem, ResultStatus, RowId, SessionState,
    StatusMessage, SubmitOutcome, UploadAccepted,
};
use chrono::Utc;
use tracing::{error, info, warn};

/// Owns the session, the split table and the paste buffer for one user.
///
/// Every operation takes `&mut self`, so an upload or submission in flight
/// excludes any other action on the same controller.
pub struct SplitterController<B> {
    backend: B,
    parser: PasteParser,
    session: SessionState,
    table: SplitTable,
    phase: Phase,
    paste_buffer: String,
    status: Option<StatusMessage>,
    bulk_status: Option<StatusMessage>,
}

impl<B: SplitterBackend> SplitterController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            parser: PasteParser::new(),
            session: SessionState::default(),
            table: SplitTable::new(),
            phase: Phase::Upload,
            paste_buffer: String::new(),
            status: None,
            bulk_status: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn table(&self) -> &SplitTable {
        &self.table
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn bulk_status(&self) -> Option<&StatusMessage> {
        self.bulk_status.as_ref()
    }

    pub fn paste_data(&self) -> &str {
        &self.paste_buffer
    }

    pub async fn upload(&mut self, candidate: UploadCandidate) -> Result<&SessionState> {
        if self.phase == Phase::Results {
            return Err(SplitterClientError::UnexpectedPhase {
                expected: Phase::Upload,
                actual: self.phase,
            });
        }

        if let Err(e) = UploadValidator::validate_candidate(&candidate) {
            self.status = Some(StatusMessage::error(e.to_string()));
            return Err(e);
        }

        let sent = self.send_upload(candidate).await;
        let accepted = match sent {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Upload failed: {}", e);
                let text = match &e {
                    SplitterClientError::Server { message } => message.clone(),
                    other => other.to_string(),
                };
                self.status = Some(StatusMessage::error(text));
                return Err(e);
            }
        };

        info!(
            "Session {} opened with {} pages",
            accepted.session_id, accepted.page_count
        );

        self.session = SessionState {
            session_id: Some(accepted.session_id),
            total_pages: accepted.page_count,
            uploaded_at: Some(Utc::now()),
        };
        self.status = Some(StatusMessage::success(accepted.message));
        self.phase = Phase::Configure;

        self.table.clear();
        self.table.add_default_row(self.session.total_pages);

        Ok(&self.session)
    }

    async fn send_upload(&self, candidate: UploadCandidate) -> Result<UploadAccepted> {
        let document = candidate.into_upload().await?;
        self.backend.upload(document).await
    }

    pub fn add_row(&mut self) -> Result<RowId> {
        self.require_configure()?;
        Ok(self.table.add_default_row(self.session.total_pages))
    }

    pub fn remove_row(&mut self, id: RowId) -> Result<()> {
        self.require_configure()?;
        self.table.remove(id)?;
        Ok(())
    }

    pub fn set_filename(&mut self, id: RowId, filename: &str) -> Result<()> {
        self.require_configure()?;
        self.table.set_filename(id, filename)
    }

    pub fn set_start_page(&mut self, id: RowId, value: i64) -> Result<u32> {
        self.require_configure()?;
        self.table.set_start_page(id, value, self.session.total_pages)
    }

    pub fn set_end_page(&mut self, id: RowId, value: i64) -> Result<u32> {
        self.require_configure()?;
        self.table.set_end_page(id, value, self.session.total_pages)
    }

    pub fn generate_rows(&mut self, count: i64) -> Result<&StatusMessage> {
        self.require_configure()?;

        if let Err(e) = self.table.generate_rows(count, self.session.total_pages) {
            self.bulk_status = Some(StatusMessage::error(e.to_string()));
            return Err(e);
        }

        let status = self.bulk_status.insert(StatusMessage::success(format!(
            "Successfully generated {} empty row(s). You can now fill them in or paste data.",
            count
        )));
        Ok(status)
    }

    pub fn set_paste_data(&mut self, text: impl Into<String>) {
        self.paste_buffer = text.into();
    }

    /// Replaces the table with the rows parsed from the paste buffer.
    pub fn apply_pasted_data(&mut self) -> Result<ParseResult> {
        self.require_configure()?;

        let parsed = match self.parser.parse(&self.paste_buffer, self.session.total_pages) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.bulk_status = Some(StatusMessage::error(e.to_string()));
                return Err(e);
            }
        };

        self.table.clear();
        for entry in &parsed.entries {
            self.table.push(entry.clone());
        }

        let result = parsed.result();
        if result.imported == 0 {
            let err = SplitterClientError::PasteImport {
                errors: parsed.error_messages(),
            };
            self.bulk_status = Some(StatusMessage::error(err.to_string()));
            return Err(err);
        }

        let mut text = format!(
            "Successfully imported {} split configuration(s) from pasted data.",
            result.imported
        );
        if !result.errors.is_empty() {
            warn!("{} pasted row(s) skipped", result.errors.len());
            text.push_str(&format!(
                " ({} row(s) skipped due to errors)",
                result.errors.len()
            ));
        }
        self.bulk_status = Some(StatusMessage::success(text));
        self.paste_buffer.clear();

        Ok(result)
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        self.require_configure()?;

        let session_id = self
            .session
            .session_id
            .clone()
            .ok_or(SplitterClientError::NoSession)?;
        let splits = SubmissionValidator::validate(&self.table, self.session.total_pages)?;

        let request = ProcessRequest { session_id, splits };
        let processed = self.backend.process(&request).await;
        let archive = match processed {
            Ok(archive) => archive,
            Err(e) => {
                error!("Processing failed: {}", e);
                return Err(e);
            }
        };

        let results = request
            .splits
            .iter()
            .map(|split| ResultItem {
                filename: split.filename.clone(),
                status: ResultStatus::Success,
                message: format!("Pages {}-{}", split.start_page, split.end_page),
            })
            .collect();

        self.phase = Phase::Results;
        info!("Received archive for {} splits", request.splits.len());

        Ok(SubmitOutcome {
            archive_name: CLIENT_DEFAULTS.archive_name.to_string(),
            archive,
            headline: format!(
                "Successfully created {} PDF file(s). Download started!",
                request.splits.len()
            ),
            results,
            completed_at: Utc::now(),
        })
    }

    pub fn reset(&mut self) {
        self.session.clear();
        self.table.clear();
        self.paste_buffer.clear();
        self.status = None;
        self.bulk_status = None;
        self.phase = Phase::Upload;
        info!("Controller reset");
    }

    fn require_configure(&self) -> Result<()> {
        if self.phase != Phase::Configure {
            return Err(SplitterClientError::UnexpectedPhase {
                expected: Phase::Configure,
                actual: self.phase,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::upload::DocumentUpload;
    use crate::types::SplitEntry;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeBackend {
        page_count: u32,
        reject_upload: Option<String>,
        process_error: Option<String>,
        uploads: RefCell<Vec<String>>,
        requests: RefCell<Vec<ProcessRequest>>,
    }

    impl FakeBackend {
        fn with_pages(page_count: u32) -> Self {
            Self {
                page_count,
                ..Self::default()
            }
        }
    }

    impl SplitterBackend for FakeBackend {
        async fn upload(&self, document: DocumentUpload) -> Result<UploadAccepted> {
            self.uploads.borrow_mut().push(document.file_name.clone());
            if let Some(message) = &self.reject_upload {
                return Err(SplitterClientError::Server {
                    message: message.clone(),
                });
            }
            Ok(UploadAccepted {
                session_id: document.file_name,
                page_count: self.page_count,
                message: format!(
                    "File uploaded successfully. Document has {} pages.",
                    self.page_count
                ),
            })
        }

        async fn process(&self, request: &ProcessRequest) -> Result<Vec<u8>> {
            self.requests.borrow_mut().push(request.clone());
            match &self.process_error {
                Some(message) => Err(SplitterClientError::Server {
                    message: message.clone(),
                }),
                None => Ok(b"PK\x05\x06".to_vec()),
            }
        }
    }

    async fn configured(pages: u32) -> SplitterController<FakeBackend> {
        let mut controller = SplitterController::new(FakeBackend::with_pages(pages));
        controller
            .upload(UploadCandidate::from_bytes("report.docx", vec![0; 16]))
            .await
            .unwrap();
        controller
    }

    #[tokio::test]
    async fn upload_seeds_single_full_range_row() {
        let controller = configured(10).await;

        assert_eq!(controller.phase(), Phase::Configure);
        assert_eq!(controller.session().session_id.as_deref(), Some("report.docx"));
        assert_eq!(controller.session().total_pages, 10);
        let rows: Vec<_> = controller.table().entries().cloned().collect();
        assert_eq!(rows, vec![SplitEntry::new("output_1.pdf", 1, 10)]);
        assert_eq!(
            controller.status().unwrap(),
            &StatusMessage::success("File uploaded successfully. Document has 10 pages.")
        );
    }

    #[tokio::test]
    async fn invalid_file_never_reaches_backend() {
        let mut controller = SplitterController::new(FakeBackend::with_pages(4));
        let err = controller
            .upload(UploadCandidate::from_bytes("slides.pptx", vec![1]))
            .await
            .unwrap_err();

        assert!(err.is_client_validation());
        assert!(controller.backend.uploads.borrow().is_empty());
        assert_eq!(controller.phase(), Phase::Upload);
        assert_eq!(
            controller.status().unwrap().text,
            "Please select a valid Word document (.doc or .docx)"
        );
    }

    #[tokio::test]
    async fn server_rejection_keeps_upload_phase() {
        let backend = FakeBackend {
            reject_upload: Some("Failed to convert Word document to PDF".to_string()),
            ..FakeBackend::default()
        };
        let mut controller = SplitterController::new(backend);
        let err = controller
            .upload(UploadCandidate::from_bytes("report.doc", vec![1]))
            .await
            .unwrap_err();

        assert!(matches!(err, SplitterClientError::Server { .. }));
        assert_eq!(controller.phase(), Phase::Upload);
        assert!(!controller.session().is_active());
        assert_eq!(
            controller.status().unwrap(),
            &StatusMessage::error("Failed to convert Word document to PDF")
        );
    }

    #[tokio::test]
    async fn paste_replaces_table_with_valid_rows_only() {
        let mut controller = configured(10).await;
        controller.add_row().unwrap();
        controller.set_paste_data("a.pdf\t1\t5\nb.pdf\t6\t12");

        let result = controller.apply_pasted_data().unwrap();

        assert_eq!(result.imported, 1);
        assert_eq!(
            result.errors[0].to_string(),
            "Row 2: End page (12) exceeds document length (10)"
        );
        let rows: Vec<_> = controller.table().entries().cloned().collect();
        assert_eq!(rows, vec![SplitEntry::new("a.pdf", 1, 5)]);
        assert_eq!(controller.paste_data(), "");
        assert_eq!(
            controller.bulk_status().unwrap().text,
            "Successfully imported 1 split configuration(s) from pasted data. (1 row(s) skipped due to errors)"
        );
    }

    #[tokio::test]
    async fn failed_paste_keeps_buffer_and_empties_table() {
        let mut controller = configured(3).await;
        controller.set_paste_data("x\t4\t9\ny\tz");

        let err = controller.apply_pasted_data().unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to import data. Errors: Row 1: End page (9) exceeds document length (3); \
             Row 2: Invalid format (need 3 columns: filename, start, end)"
        );
        assert!(controller.table().is_empty());
        assert_eq!(controller.paste_data(), "x\t4\t9\ny\tz");
    }

    #[tokio::test]
    async fn empty_paste_leaves_table_alone() {
        let mut controller = configured(3).await;
        controller.set_paste_data("   ");

        let err = controller.apply_pasted_data().unwrap_err();

        assert_eq!(err.to_string(), "Please paste some data first");
        assert_eq!(controller.table().len(), 1);
    }

    #[tokio::test]
    async fn generate_twice_keeps_requested_count() {
        let mut controller = configured(6).await;
        controller.generate_rows(5).unwrap();
        let status = controller.generate_rows(5).unwrap().clone();

        assert_eq!(controller.table().len(), 5);
        assert_eq!(
            status.text,
            "Successfully generated 5 empty row(s). You can now fill them in or paste data."
        );

        assert!(controller.generate_rows(0).is_err());
        assert_eq!(controller.table().len(), 5);
    }

    #[tokio::test]
    async fn page_edits_clamp_to_document() {
        let mut controller = configured(8).await;
        let id = controller.table().ids().next().unwrap();

        assert_eq!(controller.set_start_page(id, -2).unwrap(), 1);
        assert_eq!(controller.set_end_page(id, 40).unwrap(), 8);
        assert_eq!(controller.set_end_page(id, 0).unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_table_blocks_submission_without_request() {
        let mut controller = configured(5).await;
        let id = controller.table().ids().next().unwrap();
        controller.remove_row(id).unwrap();

        let err = controller.submit().await.unwrap_err();

        assert_eq!(err.to_string(), "Please add at least one split configuration");
        assert!(controller.backend.requests.borrow().is_empty());
        assert_eq!(controller.phase(), Phase::Configure);
    }

    #[tokio::test]
    async fn successful_submit_moves_to_results() {
        let mut controller = configured(10).await;
        controller.set_paste_data("intro\t1\t3\nbody.pdf\t4\t10");
        controller.apply_pasted_data().unwrap();

        let outcome = controller.submit().await.unwrap();

        assert_eq!(outcome.archive_name, "split_pdfs.zip");
        assert_eq!(outcome.archive, b"PK\x05\x06");
        assert_eq!(
            outcome.headline,
            "Successfully created 2 PDF file(s). Download started!"
        );
        let names: Vec<_> = outcome.results.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, ["intro.pdf", "body.pdf"]);
        assert_eq!(controller.phase(), Phase::Results);

        let requests = controller.backend.requests.borrow();
        assert_eq!(requests[0].session_id, "report.docx");
        assert_eq!(requests[0].splits.len(), 2);
    }

    #[tokio::test]
    async fn server_error_on_submit_stays_in_configure() {
        let backend = FakeBackend {
            page_count: 4,
            process_error: Some("Source file not found. Please upload again.".to_string()),
            ..FakeBackend::default()
        };
        let mut controller = SplitterController::new(backend);
        controller
            .upload(UploadCandidate::from_bytes("report.docx", vec![1]))
            .await
            .unwrap();

        let err = controller.submit().await.unwrap_err();

        assert_eq!(err.to_string(), "Error: Source file not found. Please upload again.");
        assert_eq!(controller.phase(), Phase::Configure);
        assert!(controller.submit().await.is_err());
        assert_eq!(controller.backend.requests.borrow().len(), 2);
    }

    #[tokio::test]
    async fn reset_returns_to_upload() {
        let mut controller = configured(3).await;
        controller.submit().await.unwrap();
        assert!(matches!(
            controller.add_row(),
            Err(SplitterClientError::UnexpectedPhase { .. })
        ));

        controller.reset();

        assert_eq!(controller.phase(), Phase::Upload);
        assert!(!controller.session().is_active());
        assert_eq!(controller.session().total_pages, 0);
        assert!(controller.table().is_empty());
        assert!(controller.status().is_none());

        controller
            .upload(UploadCandidate::from_bytes("second.docx", vec![1]))
            .await
            .unwrap();
        assert_eq!(controller.phase(), Phase::Configure);
    }

    #[tokio::test]
    async fn reupload_reseeds_table() {
        let mut controller = configured(3).await;
        controller.generate_rows(4).unwrap();

        controller
            .upload(UploadCandidate::from_bytes("other.docx", vec![1]))
            .await
            .unwrap();

        assert_eq!(controller.table().len(), 1);
        assert_eq!(controller.session().session_id.as_deref(), Some("other.docx"));
    }
}
