use std::path::PathBuf;
use url::Url;

use crate::error::Result;

/// Limits and names shared by the client, the CLI and tests.
#[derive(Debug, Clone, Copy)]
pub struct ClientDefaults {
    pub server_url: &'static str,
    pub max_upload_bytes: u64,
    pub allowed_extensions: &'static [&'static str],
    pub max_generated_rows: i64,
    pub archive_name: &'static str,
    pub upload_path: &'static str,
    pub process_path: &'static str,
}

pub const CLIENT_DEFAULTS: ClientDefaults = ClientDefaults {
    server_url: "http://127.0.0.1:5001",
    max_upload_bytes: 50 * 1024 * 1024,
    allowed_extensions: &[".doc", ".docx"],
    max_generated_rows: 100,
    archive_name: "split_pdfs.zip",
    upload_path: "upload",
    process_path: "process",
};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: Url,
    pub output_dir: PathBuf,
    pub force: bool,
}

impl ClientConfig {
    pub fn new(server_url: &str, output_dir: PathBuf, force: bool) -> Result<Self> {
        Ok(Self {
            server_url: Self::normalize_base(server_url)?,
            output_dir,
            force,
        })
    }

    pub fn upload_url(&self) -> Result<Url> {
        Ok(self.server_url.join(CLIENT_DEFAULTS.upload_path)?)
    }

    pub fn process_url(&self) -> Result<Url> {
        Ok(self.server_url.join(CLIENT_DEFAULTS.process_path)?)
    }

    // Url::join drops the last segment unless the base ends with '/'.
    fn normalize_base(raw: &str) -> Result<Url> {
        let mut url = Url::parse(raw)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: Url::parse(&format!("{}/", CLIENT_DEFAULTS.server_url))
                .expect("default server URL is valid"),
            output_dir: PathBuf::from("./output"),
            force: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_onto_base() {
        let config = ClientConfig::new("http://localhost:5001", PathBuf::from("out"), false).unwrap();
        assert_eq!(config.upload_url().unwrap().as_str(), "http://localhost:5001/upload");
        assert_eq!(config.process_url().unwrap().as_str(), "http://localhost:5001/process");
    }

    #[test]
    fn endpoints_keep_path_prefix() {
        let config = ClientConfig::new("https://tools.example.com/splitter", PathBuf::from("out"), false).unwrap();
        assert_eq!(
            config.process_url().unwrap().as_str(),
            "https://tools.example.com/splitter/process"
        );
    }

    #[test]
    fn rejects_malformed_server_url() {
        assert!(ClientConfig::new("not a url", PathBuf::from("out"), false).is_err());
    }
}
