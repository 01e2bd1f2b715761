//! Upload documents use case implementation.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::application::dto::UploadOutcome;
use crate::domain::errors::UploadError;
use crate::domain::ports::DocumentQaPort;

/// Sends the selected files for indexing and classifies the reply.
#[derive(Clone)]
pub struct UploadDocumentsUseCase {
    port: Arc<dyn DocumentQaPort>,
}

impl UploadDocumentsUseCase {
    /// Creates new upload use case.
    #[must_use]
    pub const fn new(port: Arc<dyn DocumentQaPort>) -> Self {
        Self { port }
    }

    /// Uploads `files` in the given order.
    ///
    /// # Errors
    /// Returns error if a file cannot be read, the server is unreachable,
    /// or it answers with a non-success status.
    pub async fn execute(&self, files: &[PathBuf]) -> Result<UploadOutcome, UploadError> {
        debug!(count = files.len(), "Uploading documents");

        let receipt = self.port.upload_documents(files).await?;

        Ok(UploadOutcome::from(receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UploadReceipt;
    use crate::domain::ports::mocks::MockDocumentQa;

    fn files() -> Vec<PathBuf> {
        vec![PathBuf::from("a.pdf"), PathBuf::from("b.txt")]
    }

    #[tokio::test]
    async fn test_successful_upload() {
        let port = Arc::new(MockDocumentQa::new());
        port.push_upload(Ok(UploadReceipt {
            status: Some("success".to_string()),
            chunks: Some(7),
        }));

        let use_case = UploadDocumentsUseCase::new(port.clone());
        let outcome = use_case.execute(&files()).await.unwrap();

        assert_eq!(outcome, UploadOutcome::Processed { chunks: Some(7) });
        assert_eq!(port.uploads(), vec![files()]);
    }

    #[tokio::test]
    async fn test_unexpected_status() {
        let port = Arc::new(MockDocumentQa::new());
        port.push_upload(Ok(UploadReceipt::with_status("error")));

        let use_case = UploadDocumentsUseCase::new(port);
        let outcome = use_case.execute(&files()).await.unwrap();

        assert!(matches!(outcome, UploadOutcome::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_rejected_upload() {
        let port = Arc::new(MockDocumentQa::new());
        port.push_upload(Err(UploadError::rejected(400)));

        let use_case = UploadDocumentsUseCase::new(port);
        let result = use_case.execute(&files()).await;

        assert!(matches!(result, Err(UploadError::Rejected { status: 400 })));
    }
}
