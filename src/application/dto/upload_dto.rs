//! Upload DTOs.

use crate::domain::entities::UploadReceipt;

/// How an upload that reached the server should be treated by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Server reported the success sentinel.
    Processed {
        /// Number of chunks indexed, when reported.
        chunks: Option<u64>,
    },
    /// Server answered 2xx with any other status, or none at all.
    UnexpectedResponse {
        /// Status value received, if the body had one.
        status: Option<String>,
    },
}

impl UploadOutcome {
    /// Returns whether the documents are ready to be queried.
    #[must_use]
    pub const fn is_processed(&self) -> bool {
        matches!(self, Self::Processed { .. })
    }

    /// Returns the text shown to the user for this outcome.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Processed { chunks: Some(chunks) } => {
                format!("Documents processed successfully! ({chunks} chunks indexed)")
            }
            Self::Processed { chunks: None } => "Documents processed successfully!".to_string(),
            Self::UnexpectedResponse { status: Some(status) } => {
                format!("Unexpected server response: status \"{status}\"")
            }
            Self::UnexpectedResponse { status: None } => {
                "Unexpected server response: no status reported".to_string()
            }
        }
    }
}

impl From<UploadReceipt> for UploadOutcome {
    fn from(receipt: UploadReceipt) -> Self {
        if receipt.is_success() {
            Self::Processed {
                chunks: receipt.chunks,
            }
        } else {
            Self::UnexpectedResponse {
                status: receipt.status,
            }
        }
    }
}
