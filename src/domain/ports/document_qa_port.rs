//! Document question-answering port definition.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::entities::{Answer, UploadReceipt};
use crate::domain::errors::{AskError, UploadError};

/// Port for the remote document question-answering service.
#[async_trait]
pub trait DocumentQaPort: Send + Sync {
    /// Uploads files, in order, for indexing.
    async fn upload_documents(&self, files: &[PathBuf]) -> Result<UploadReceipt, UploadError>;

    /// Asks a question against the indexed documents.
    ///
    /// Callers pass an already trimmed, non-empty question.
    async fn ask_question(&self, question: &str) -> Result<Answer, AskError>;
}
