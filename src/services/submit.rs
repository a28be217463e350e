use crate::error::{Result, SplitterClientError};
use crate::services::table::SplitTable;
use crate::types::SplitRequest;
use tracing::debug;

/// Blocking checks run before a split list is sent to `/process`.
pub struct SubmissionValidator;

impl SubmissionValidator {
    pub fn validate(table: &SplitTable, total_pages: u32) -> Result<Vec<SplitRequest>> {
        if table.is_empty() {
            return Err(Self::reject("Please add at least one split configuration".to_string()));
        }

        let mut splits = Vec::with_capacity(table.len());
        for (idx, entry) in table.entries().enumerate() {
            let filename = entry.filename.trim();
            if filename.is_empty() {
                return Err(Self::reject(format!(
                    "Please enter a filename for row {}",
                    idx + 1
                )));
            }

            splits.push(SplitRequest {
                filename: filename.to_string(),
                start_page: entry.start_page,
                end_page: entry.end_page,
            });
        }

        for (idx, split) in splits.iter().enumerate() {
            let row = idx + 1;
            if split.start_page < 1 || split.end_page < 1 {
                return Err(Self::reject(format!(
                    "Invalid page range in row {}: Pages must be greater than 0",
                    row
                )));
            }
            if split.start_page > split.end_page {
                return Err(Self::reject(format!(
                    "Invalid page range in row {}: Start page cannot be greater than end page",
                    row
                )));
            }
            if split.end_page > total_pages {
                return Err(Self::reject(format!(
                    "Invalid page range in row {}: End page exceeds document length ({} pages)",
                    row, total_pages
                )));
            }
        }

        debug!("Validated {} split configurations", splits.len());
        Ok(splits)
    }

    fn reject(reason: String) -> SplitterClientError {
        SplitterClientError::Validation { reason }
    }
}
