//! Ask error types.

use thiserror::Error;

/// Message used when the server gave no detail.
pub const ASK_FAILED: &str = "Ask failed";

/// Detail the server returns when nothing has been indexed yet.
pub const MISSING_INDEX_DETAIL: &str = "Upload documents first";

/// Ask error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AskError {
    #[error("{}", .detail.as_deref().unwrap_or(ASK_FAILED))]
    Rejected { status: u16, detail: Option<String> },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("unreadable answer: {message}")]
    Decode { message: String },
}

impl AskError {
    /// Creates rejected error with optional server detail.
    #[must_use]
    pub fn rejected(status: u16, detail: Option<String>) -> Self {
        Self::Rejected { status, detail }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates response decoding error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns server-provided detail, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Returns whether the server reported that no documents are indexed.
    #[must_use]
    pub fn is_missing_index(&self) -> bool {
        self.detail().is_some_and(|detail| {
            detail
                .trim()
                .trim_end_matches('!')
                .eq_ignore_ascii_case(MISSING_INDEX_DETAIL)
        })
    }
}
