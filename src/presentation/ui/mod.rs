//! UI screens.

mod app;
mod chat_screen;
mod notification_popup;
mod upload_screen;
pub mod utils;

pub use app::{APP_TITLE, App, AppSettings};
pub use chat_screen::{ASK_FAILED_NOTICE, ChatScreen};
pub use notification_popup::NotificationPopup;
pub use upload_screen::{
    EMPTY_SELECTION_ALERT, PickerOptions, UPLOAD_FAILED_ALERT, UploadScreen, UploadSignal,
};
