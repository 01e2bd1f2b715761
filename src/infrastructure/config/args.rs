use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(
    name = "documind",
    version,
    about = "Ask questions about your documents from the terminal",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Server origin, e.g. `http://localhost:8000`.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Show the actual error message when a question fails.
    #[arg(long)]
    pub precise_errors: Option<bool>,

    /// Directory the file picker opens in.
    #[arg(long, value_name = "PATH")]
    pub start_dir: Option<PathBuf>,
}
