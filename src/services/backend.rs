use crate::config::ClientConfig;
use crate::error::{Result, SplitterClientError};
use crate::services::upload::DocumentUpload;
use crate::types::{ErrorResponse, ProcessRequest, UploadAccepted, UploadResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart;
use tracing::{debug, info, warn};

/// The two round-trips the splitting server offers.
#[allow(async_fn_in_trait)]
pub trait SplitterBackend {
    async fn upload(&self, document: DocumentUpload) -> Result<UploadAccepted>;

    /// Returns the ZIP archive bytes on success.
    async fn process(&self, request: &ProcessRequest) -> Result<Vec<u8>>;
}

pub struct HttpSplitterClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpSplitterClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl SplitterBackend for HttpSplitterClient {
    async fn upload(&self, document: DocumentUpload) -> Result<UploadAccepted> {
        let url = self.config.upload_url()?;
        info!("Uploading {} ({} bytes) to {}", document.file_name, document.bytes.len(), url);

        let part = multipart::Part::bytes(document.bytes).file_name(document.file_name);
        let form = multipart::Form::new().part("file", part);

        let response = self.client.post(url).multipart(form).send().await?;
        let ok = response.status().is_success();
        debug!("Upload answered with HTTP {}", response.status().as_u16());

        let body: UploadResponse = response.json().await?;
        interpret_upload(ok, body)
    }

    async fn process(&self, request: &ProcessRequest) -> Result<Vec<u8>> {
        let url = self.config.process_url()?;
        info!("Submitting {} splits to {}", request.splits.len(), url);

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;
        debug!("Process answered with HTTP {} ({} bytes)", status.as_u16(), body.len());

        interpret_process(status.is_success(), content_type.as_deref(), &body)
    }
}

/// Maps a `/process` reply onto the archive bytes or the server's complaint.
///
/// Only a successful reply typed `application/zip` is an archive; every other
/// reply is read as `{"error": ...}`.
pub fn interpret_process(http_ok: bool, content_type: Option<&str>, body: &[u8]) -> Result<Vec<u8>> {
    if http_ok && content_type.map(is_zip_content_type).unwrap_or(false) {
        return Ok(body.to_vec());
    }

    warn!("Processing did not return an archive (content type {:?})", content_type);
    let reply: ErrorResponse = serde_json::from_slice(body)?;
    Err(SplitterClientError::Server {
        message: reply.error.unwrap_or_else(|| "Processing failed".to_string()),
    })
}

pub fn is_zip_content_type(content_type: &str) -> bool {
    content_type.contains("application/zip")
}

/// Maps an `/upload` reply onto the accepted session or the server's complaint.
pub fn interpret_upload(http_ok: bool, body: UploadResponse) -> Result<UploadAccepted> {
    if http_ok && body.success {
        if let (Some(session_id), Some(page_count)) = (body.session_id, body.page_count) {
            return Ok(UploadAccepted {
                session_id,
                page_count,
                message: body.message.unwrap_or_default(),
            });
        }
        return Err(SplitterClientError::Server {
            message: "Upload failed".to_string(),
        });
    }

    Err(SplitterClientError::Server {
        message: body.error.unwrap_or_else(|| "Upload failed".to_string()),
    })
}
