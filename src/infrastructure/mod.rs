//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Question-answering server client.
pub mod qa_server;

pub use config::{AppConfig, CliArgs, ConfigError, LoadedConfig, LogLevel, StorageManager};
pub use qa_server::{DEFAULT_BASE_URL, DocumentQaClient};
