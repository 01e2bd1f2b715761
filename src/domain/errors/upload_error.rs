//! Upload error types.

use std::path::PathBuf;

use thiserror::Error;

/// Upload error variants.
///
/// Server-provided detail is never carried; a rejected upload is reported
/// with the same generic message whatever the server said.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum UploadError {
    #[error("Upload failed")]
    Rejected { status: u16 },

    #[error("Upload failed: {message}")]
    Network { message: String },

    #[error("failed to read {}: {message}", path.display())]
    File { path: PathBuf, message: String },
}

impl UploadError {
    /// Creates rejected error from a non-success HTTP status.
    #[must_use]
    pub const fn rejected(status: u16) -> Self {
        Self::Rejected { status }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates local file error.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns whether the request reached the server.
    #[must_use]
    pub const fn is_server_response(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_is_generic() {
        assert_eq!(UploadError::rejected(500).to_string(), "Upload failed");
        assert_eq!(UploadError::rejected(400).to_string(), "Upload failed");
    }

    #[test]
    fn test_file_error_names_path() {
        let err = UploadError::file("/tmp/missing.pdf", "not found");
        assert_eq!(err.to_string(), "failed to read /tmp/missing.pdf: not found");
        assert!(!err.is_server_response());
    }
}
