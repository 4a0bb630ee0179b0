//! Formatting backend API client
//!
//! Typed client for the EasyWord backend: upload a `.docx` for formatting and
//! get the processed file back, or request a preview which arrives as a
//! tagged [`PreviewPayload`]. Non-2xx responses carry a JSON
//! `{"detail": ...}` body that becomes the error message.

use reqwest::multipart;
use thiserror::Error;

use crate::preview::PreviewPayload;

/// Base URL used when `EASYWORD_API_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// Filenames used when the backend omits or mangles Content-Disposition.
const UPLOAD_FALLBACK_FILENAME: &str = "formatted-document.docx";
const TEST_FALLBACK_FILENAME: &str = "formatted-test_result.docx";

/// Errors from backend API calls
#[derive(Debug, Error)]
pub enum ClientError {
    /// Upload rejected before any request is made
    #[error("only .docx files are supported")]
    UnsupportedExtension,

    /// Backend answered with an error status
    #[error("API error: {0}")]
    Api(String),

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub base_url: String,
}

impl ClientConfig {
    /// Read the base URL from `EASYWORD_API_URL`, falling back to
    /// [`DEFAULT_BASE_URL`]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("EASYWORD_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// A processed document returned by the backend
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    /// Download filename from Content-Disposition (or the fallback)
    pub filename: String,
    /// The processed file bytes
    pub content: Vec<u8>,
}

/// HTTP client for the formatting backend
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
        }
    }

    /// Upload a `.docx` for formatting and return the processed file
    pub async fn process(&self, filename: &str, content: Vec<u8>) -> ClientResult<ProcessedDocument> {
        let form = Self::docx_form(filename, content)?;

        tracing::debug!("uploading '{}' for processing", filename);
        let response = self
            .http
            .post(format!("{}/api/process", self.base_url))
            .multipart(form)
            .send()
            .await?;

        self.read_document(response, UPLOAD_FALLBACK_FILENAME).await
    }

    /// Run the backend's built-in sample document through formatting
    pub async fn run_test(&self) -> ClientResult<ProcessedDocument> {
        let response = self
            .http
            .get(format!("{}/api/test", self.base_url))
            .send()
            .await?;

        self.read_document(response, TEST_FALLBACK_FILENAME).await
    }

    /// Request a preview of an uploaded `.docx`
    pub async fn preview(&self, filename: &str, content: Vec<u8>) -> ClientResult<PreviewPayload> {
        let form = Self::docx_form(filename, content)?;

        let response = self
            .http
            .post(format!("{}/api/preview", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Request a preview of the sample document
    pub async fn preview_test(&self) -> ClientResult<PreviewPayload> {
        let response = self
            .http
            .get(format!("{}/api/preview/test", self.base_url))
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Backend liveness probe
    pub async fn health(&self) -> ClientResult<bool> {
        let response = self
            .http
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;

        Ok(response.status().is_success())
    }

    fn docx_form(filename: &str, content: Vec<u8>) -> ClientResult<multipart::Form> {
        if !filename.ends_with(".docx") {
            return Err(ClientError::UnsupportedExtension);
        }

        let part = multipart::Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str(DOCX_MIME)?;
        Ok(multipart::Form::new().part("file", part))
    }

    async fn read_document(
        &self,
        response: reqwest::Response,
        fallback: &str,
    ) -> ClientResult<ProcessedDocument> {
        let response = Self::check_status(response).await?;

        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_filename)
            .unwrap_or_else(|| fallback.to_string());

        let content = response.bytes().await?.to_vec();
        tracing::debug!("received '{}' ({} bytes)", filename, content.len());

        Ok(ProcessedDocument { filename, content })
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("detail")?.as_str().map(String::from))
            .unwrap_or_else(|| format!("backend returned {status}"));

        Err(ClientError::Api(detail))
    }
}

/// Extract the attachment filename from a `Content-Disposition` value
///
/// Accepts both the quoted form the backend emits
/// (`attachment; filename="report.docx"`) and the unquoted form some proxies
/// rewrite it to.
pub fn attachment_filename(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let rest = rest.trim();

    let name = if let Some(stripped) = rest.strip_prefix('"') {
        stripped.split('"').next()?
    } else {
        rest.split(';').next()?.trim()
    };

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_filename_quoted() {
        let header = r#"attachment; filename="ket_qua.docx""#;
        assert_eq!(attachment_filename(header), Some("ket_qua.docx".to_string()));
    }

    #[test]
    fn test_attachment_filename_unquoted() {
        assert_eq!(
            attachment_filename("attachment; filename=report.docx"),
            Some("report.docx".to_string())
        );
        assert_eq!(
            attachment_filename("attachment; filename=report.docx; size=1024"),
            Some("report.docx".to_string())
        );
    }

    #[test]
    fn test_attachment_filename_missing_or_empty() {
        assert_eq!(attachment_filename("attachment"), None);
        assert_eq!(attachment_filename(r#"attachment; filename="""#), None);
    }

    #[test]
    fn test_docx_form_rejects_other_extensions() {
        let result = ApiClient::docx_form("notes.txt", vec![1, 2, 3]);
        assert!(matches!(result, Err(ClientError::UnsupportedExtension)));

        assert!(ApiClient::docx_form("notes.docx", vec![1, 2, 3]).is_ok());
    }

    #[test]
    fn test_default_config_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
