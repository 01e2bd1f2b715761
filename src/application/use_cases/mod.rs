//! Use case implementations.

mod ask_question_use_case;
mod upload_documents_use_case;

pub use ask_question_use_case::AskQuestionUseCase;
pub use upload_documents_use_case::UploadDocumentsUseCase;
