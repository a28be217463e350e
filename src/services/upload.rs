use crate::config::CLIENT_DEFAULTS;
use crate::error::{Result, SplitterClientError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

#[derive(Debug, Clone)]
enum CandidateSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// A document the user picked, before anything is sent.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    pub name: String,
    pub size: u64,
    source: CandidateSource,
}

/// Validated document contents ready for the multipart form.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadCandidate {
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() || !path.is_file() {
            return Err(SplitterClientError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let size = fs::metadata(path).await?.len();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        debug!("Selected {} ({} bytes)", name, size);

        Ok(Self {
            name,
            size,
            source: CandidateSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            source: CandidateSource::Memory(bytes),
        }
    }

    /// Loads the contents; call only after the candidate passed validation.
    pub async fn into_upload(self) -> Result<DocumentUpload> {
        let bytes = match self.source {
            CandidateSource::Path(path) => fs::read(&path).await?,
            CandidateSource::Memory(bytes) => bytes,
        };

        Ok(DocumentUpload {
            file_name: self.name,
            bytes,
        })
    }
}

pub struct UploadValidator;

impl UploadValidator {
    pub fn validate(name: &str, size: u64) -> Result<()> {
        let lowered = name.to_lowercase();
        let has_word_extension = CLIENT_DEFAULTS
            .allowed_extensions
            .iter()
            .any(|ext| lowered.ends_with(ext));

        if !has_word_extension {
            return Err(SplitterClientError::UnsupportedFileType {
                name: name.to_string(),
            });
        }

        if size > CLIENT_DEFAULTS.max_upload_bytes {
            return Err(SplitterClientError::FileTooLarge { size });
        }

        info!("Accepted {} for upload ({} bytes)", name, size);
        Ok(())
    }

    pub fn validate_candidate(candidate: &UploadCandidate) -> Result<()> {
        Self::validate(&candidate.name, candidate.size)
    }
}
