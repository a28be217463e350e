use crate::error::{Result, SplitterClientError};
use crate::types::{LineError, ParseResult, SplitEntry};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

/// Entries and per-line failures from one block of pasted text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedPaste {
    pub entries: Vec<SplitEntry>,
    pub errors: Vec<LineError>,
}

impl ParsedPaste {
    pub fn result(&self) -> ParseResult {
        ParseResult {
            imported: self.entries.len(),
            errors: self.errors.clone(),
        }
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

/// Turns spreadsheet-style rows (`filename<TAB>start<TAB>end`) into split entries.
pub struct PasteParser {
    column_separator: Regex,
    leading_integer: Regex,
}

impl PasteParser {
    pub fn new() -> Self {
        Self {
            column_separator: Regex::new(r"\t+|\s{2,}").unwrap(),
            leading_integer: Regex::new(r"^[+-]?[0-9]+").unwrap(),
        }
    }

    pub fn parse(&self, text: &str, total_pages: u32) -> Result<ParsedPaste> {
        if text.trim().is_empty() {
            return Err(SplitterClientError::NoPasteData);
        }

        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        if lines.is_empty() {
            return Err(SplitterClientError::NoValidPasteData);
        }

        let mut parsed = ParsedPaste::default();

        for (idx, line) in lines.iter().enumerate() {
            let line_number = idx + 1;
            match self.parse_line(line, total_pages) {
                Ok(entry) => parsed.entries.push(entry),
                Err(message) => {
                    debug!("Skipping pasted row {}: {}", line_number, message);
                    parsed.errors.push(LineError {
                        line: line_number,
                        message,
                    });
                }
            }
        }

        info!(
            "Parsed {} pasted rows: {} accepted, {} rejected",
            lines.len(),
            parsed.entries.len(),
            parsed.errors.len()
        );

        Ok(parsed)
    }

    fn parse_line(&self, line: &str, total_pages: u32) -> std::result::Result<SplitEntry, String> {
        let parts: Vec<&str> = self
            .column_separator
            .split(line)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() < 3 {
            return Err("Invalid format (need 3 columns: filename, start, end)".to_string());
        }

        let filename = parts[0];
        if filename.is_empty() {
            return Err("Empty filename".to_string());
        }

        let ((start, _), (end, end_text)) =
            match (self.read_integer(parts[1]), self.read_integer(parts[2])) {
                (Some(start), Some(end)) => (start, end),
                _ => return Err("Invalid page numbers".to_string()),
            };

        if start < 1 || end < 1 {
            return Err("Page numbers must be greater than 0".to_string());
        }

        if start > end {
            return Err("Start page cannot be greater than end page".to_string());
        }

        if end > i64::from(total_pages) {
            let shown = if end == i64::MAX {
                end_text.to_string()
            } else {
                end.to_string()
            };
            return Err(format!(
                "End page ({}) exceeds document length ({})",
                shown, total_pages
            ));
        }

        // 1 <= start <= end <= total_pages, so both fit in u32.
        Ok(SplitEntry::new(
            normalize_filename(filename),
            start as u32,
            end as u32,
        ))
    }

    /// Reads the leading ASCII integer of a cell: `"5"`, `"5abc"` and `"5.9"` all give 5.
    ///
    /// Values past the `i64` range saturate; the matched text is kept for messages.
    fn read_integer<'a>(&self, cell: &'a str) -> Option<(i64, &'a str)> {
        let digits = self.leading_integer.find(cell)?.as_str();
        let value = digits.parse::<i64>().unwrap_or(if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        });
        Some((value, digits.trim_start_matches('+')))
    }
}

impl Default for PasteParser {
    fn default() -> Self {
        Self::new()
    }
}

pub fn normalize_filename(filename: &str) -> String {
    if filename.ends_with(".pdf") {
        filename.to_string()
    } else {
        format!("{}.pdf", filename)
    }
}
