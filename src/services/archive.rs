use crate::error::{Result, SplitterClientError};
use crate::types::SubmitOutcome;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Writes the archive returned by `/process` into the output directory.
pub struct ArchiveWriter;

impl ArchiveWriter {
    /// Fails early when the archive would clobber an existing file without `force`.
    ///
    /// Run this before uploading so a refused overwrite never costs a processing run.
    pub fn check_target(output_dir: &Path, archive_name: &str, force: bool) -> Result<PathBuf> {
        let target = output_dir.join(archive_name);
        if target.exists() && !force {
            return Err(SplitterClientError::Validation {
                reason: format!(
                    "{} already exists. Use --force to overwrite.",
                    target.display()
                ),
            });
        }
        Ok(target)
    }

    pub async fn save(outcome: &SubmitOutcome, output_dir: &Path, force: bool) -> Result<PathBuf> {
        Self::ensure_output_directory(output_dir).await?;

        let target = Self::check_target(output_dir, &outcome.archive_name, force)?;
        fs::write(&target, &outcome.archive).await?;
        info!("Saved {} ({} bytes)", target.display(), outcome.archive.len());
        Ok(target)
    }

    async fn ensure_output_directory(output_dir: &Path) -> Result<()> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir).await?;
            info!("Created output directory: {}", output_dir.display());
        }
        Ok(())
    }
}
