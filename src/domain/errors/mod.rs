//! Domain error types.

mod ask_error;
mod upload_error;

pub use ask_error::{ASK_FAILED, AskError, MISSING_INDEX_DETAIL};
pub use upload_error::UploadError;
