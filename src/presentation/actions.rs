//! Messages delivered back to the event loop by background tasks.

use crate::application::dto::UploadOutcome;
use crate::domain::entities::Answer;
use crate::domain::errors::{AskError, UploadError};
use crate::domain::request::RequestToken;

/// Action routed to the view that issued it.
#[derive(Debug)]
pub enum Action {
    /// Addressed to the upload view.
    Upload(UploadAction),
    /// Addressed to the chat view.
    Chat(ChatAction),
}

#[derive(Debug)]
pub enum UploadAction {
    /// Upload request completed.
    Finished {
        token: RequestToken,
        result: Result<UploadOutcome, UploadError>,
    },
    /// Success notification has been shown for its full duration.
    ConfirmationElapsed { token: RequestToken },
}

#[derive(Debug)]
pub enum ChatAction {
    /// Question request completed.
    Answered {
        token: RequestToken,
        result: Result<Answer, AskError>,
    },
    /// Error notification has been shown for its full duration.
    NotificationElapsed { token: RequestToken },
}

impl From<UploadAction> for Action {
    fn from(action: UploadAction) -> Self {
        Self::Upload(action)
    }
}

impl From<ChatAction> for Action {
    fn from(action: ChatAction) -> Self {
        Self::Chat(action)
    }
}
