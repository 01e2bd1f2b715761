//! Domain layer with core entities, errors, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Transient notifications.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Request lifecycle tokens.
pub mod request;

pub use entities::{Answer, Message, Role, SelectedFileSet, Transcript, UploadReceipt};
pub use errors::{AskError, UploadError};
pub use notification::{NOTIFICATION_DELAY, Notification, NotificationLevel};
pub use ports::DocumentQaPort;
pub use request::{RequestToken, RequestTracker};
