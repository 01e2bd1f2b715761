//! HTTP client for the document question-answering server.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use super::dto::{self, AskRequest};
use crate::domain::entities::{Answer, UploadReceipt, display_name};
use crate::domain::errors::{AskError, UploadError};
use crate::domain::ports::DocumentQaPort;

/// Default server origin.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Multipart field name repeated once per uploaded file.
pub const UPLOAD_FIELD: &str = "files";

const USER_AGENT: &str = concat!("documind/", env!("CARGO_PKG_VERSION"));

/// Server client. Sends no auth headers and enforces no timeout.
pub struct DocumentQaClient {
    client: Client,
    base_url: String,
}

impl DocumentQaClient {
    /// Creates new client against the default origin.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Returns the origin requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn build_form(files: &[PathBuf]) -> Result<Form, UploadError> {
        let mut form = Form::new();
        for path in files {
            form = form.part(UPLOAD_FIELD, Self::file_part(path).await?);
        }
        Ok(form)
    }

    async fn file_part(path: &Path) -> Result<Part, UploadError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| UploadError::file(path, e.to_string()))?;

        Ok(Part::bytes(bytes).file_name(display_name(path)))
    }
}

fn describe_send_error(e: &reqwest::Error) -> String {
    if e.is_connect() {
        "failed to connect to server".to_string()
    } else if e.is_timeout() {
        "request timed out".to_string()
    } else {
        e.to_string()
    }
}

#[async_trait]
impl DocumentQaPort for DocumentQaClient {
    async fn upload_documents(&self, files: &[PathBuf]) -> Result<UploadReceipt, UploadError> {
        let url = self.url("/upload");
        let form = Self::build_form(files).await?;

        debug!(url = %url, files = files.len(), "Sending upload request");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::network(describe_send_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::rejected(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UploadError::network(describe_send_error(&e)))?;
        let receipt = dto::upload_receipt(&body);

        debug!(status = ?receipt.status, chunks = ?receipt.chunks, "Upload response received");
        Ok(receipt)
    }

    async fn ask_question(&self, question: &str) -> Result<Answer, AskError> {
        let url = self.url("/ask");

        debug!(url = %url, "Sending question");

        let response = self
            .client
            .post(&url)
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|e| AskError::network(describe_send_error(&e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AskError::network(describe_send_error(&e)))?;

        if !status.is_success() {
            return Err(AskError::rejected(status.as_u16(), dto::error_detail(&body)));
        }

        dto::answer(&body)
            .ok_or_else(|| AskError::decode("expected an object with an answer string"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DocumentQaClient::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = DocumentQaClient::with_base_url("http://example.test:9000/").unwrap();
        assert_eq!(client.url("/ask"), "http://example.test:9000/ask");
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_sending() {
        let client = DocumentQaClient::with_base_url("http://127.0.0.1:9").unwrap();
        let result = client
            .upload_documents(&[PathBuf::from("/definitely/not/here.pdf")])
            .await;

        assert!(matches!(result, Err(UploadError::File { .. })));
    }
}
