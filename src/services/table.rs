use crate::config::CLIENT_DEFAULTS;
use crate::error::{Result, SplitterClientError};
use crate::types::{RowId, SplitEntry};
use tracing::debug;

/// Ordered split rows with stable ids; insertion order is processing order.
#[derive(Debug, Clone, Default)]
pub struct SplitTable {
    rows: Vec<(RowId, SplitEntry)>,
    next_id: u64,
}

impl SplitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn push(&mut self, entry: SplitEntry) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push((id, entry));
        id
    }

    /// Appends `output_<n>.pdf` spanning the whole document.
    pub fn add_default_row(&mut self, total_pages: u32) -> RowId {
        let filename = format!("output_{}.pdf", self.rows.len() + 1);
        self.push(SplitEntry::new(filename, 1, total_pages))
    }

    /// Replaces every row with `count` fresh default rows.
    pub fn generate_rows(&mut self, count: i64, total_pages: u32) -> Result<Vec<RowId>> {
        if count < 1 || count > CLIENT_DEFAULTS.max_generated_rows {
            return Err(SplitterClientError::Validation {
                reason: format!(
                    "Please enter a valid number between 1 and {}",
                    CLIENT_DEFAULTS.max_generated_rows
                ),
            });
        }

        self.clear();
        let ids = (0..count).map(|_| self.add_default_row(total_pages)).collect();
        debug!("Generated {} default rows", count);
        Ok(ids)
    }

    pub fn remove(&mut self, id: RowId) -> Result<SplitEntry> {
        let idx = self.position(id)?;
        Ok(self.rows.remove(idx).1)
    }

    pub fn get(&self, id: RowId) -> Option<&SplitEntry> {
        self.rows.iter().find(|(row_id, _)| *row_id == id).map(|(_, e)| e)
    }

    pub fn set_filename(&mut self, id: RowId, filename: &str) -> Result<()> {
        self.entry_mut(id)?.filename = filename.to_string();
        Ok(())
    }

    pub fn set_start_page(&mut self, id: RowId, value: i64, total_pages: u32) -> Result<u32> {
        let page = clamp_page(value, 1, total_pages);
        self.entry_mut(id)?.start_page = page;
        Ok(page)
    }

    pub fn set_end_page(&mut self, id: RowId, value: i64, total_pages: u32) -> Result<u32> {
        let page = clamp_page(value, 1, total_pages);
        self.entry_mut(id)?.end_page = page;
        Ok(page)
    }

    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.iter().map(|(id, _)| *id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &SplitEntry> {
        self.rows.iter().map(|(_, entry)| entry)
    }

    fn position(&self, id: RowId) -> Result<usize> {
        self.rows
            .iter()
            .position(|(row_id, _)| *row_id == id)
            .ok_or(SplitterClientError::UnknownRow { id: id.0 })
    }

    fn entry_mut(&mut self, id: RowId) -> Result<&mut SplitEntry> {
        let idx = self.position(id)?;
        Ok(&mut self.rows[idx].1)
    }
}

/// Pulls an edited page value into `[min, max]`.
pub fn clamp_page(value: i64, min: u32, max: u32) -> u32 {
    if value < i64::from(min) {
        min
    } else if value > i64::from(max) {
        max
    } else {
        value as u32
    }
}
