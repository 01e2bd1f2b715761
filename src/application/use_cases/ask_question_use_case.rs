//! Ask question use case implementation.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::Answer;
use crate::domain::errors::AskError;
use crate::domain::ports::DocumentQaPort;

/// Sends a question to the service.
#[derive(Clone)]
pub struct AskQuestionUseCase {
    port: Arc<dyn DocumentQaPort>,
}

impl AskQuestionUseCase {
    /// Creates new ask use case.
    #[must_use]
    pub const fn new(port: Arc<dyn DocumentQaPort>) -> Self {
        Self { port }
    }

    /// Trims raw input, returning `None` when nothing is left to ask.
    #[must_use]
    pub fn prepare(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Asks a prepared question.
    ///
    /// # Errors
    /// Returns error if the server is unreachable, rejects the question,
    /// or answers with an unreadable body.
    pub async fn execute(&self, question: &str) -> Result<Answer, AskError> {
        debug!(length = question.len(), "Asking question");

        self.port.ask_question(question).await
    }
}
