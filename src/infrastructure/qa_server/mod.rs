//! Document question-answering server client.

mod client;
mod dto;

pub use client::{DEFAULT_BASE_URL, DocumentQaClient, UPLOAD_FIELD};
