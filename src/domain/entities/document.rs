//! Document selection and upload results.

use std::path::{Path, PathBuf};

/// Status value the server reports once documents are indexed.
pub const UPLOAD_SUCCESS_STATUS: &str = "success";

/// Files picked for upload, in the order they were chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedFileSet {
    files: Vec<PathBuf>,
}

impl SelectedFileSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Replaces the whole selection.
    pub fn replace(&mut self, files: Vec<PathBuf>) {
        self.files = files;
    }

    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns a short "N file(s) selected" readout, or `None` when empty.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if self.files.is_empty() {
            None
        } else {
            Some(format!("{} file(s) selected", self.files.len()))
        }
    }
}

/// Returns the file name component of a path, lossily decoded.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// What the upload endpoint reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Processing status reported by the server, as text.
    pub status: Option<String>,
    /// Number of chunks indexed, when reported.
    pub chunks: Option<u64>,
}

impl UploadReceipt {
    #[must_use]
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            chunks: None,
        }
    }

    /// Returns true only for the exact success sentinel.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(UPLOAD_SUCCESS_STATUS)
    }
}
