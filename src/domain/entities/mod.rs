//! Domain entity definitions.

mod document;
mod message;

pub use document::{SelectedFileSet, UPLOAD_SUCCESS_STATUS, UploadReceipt, display_name};
pub use message::{Answer, Message, Role, Transcript};
