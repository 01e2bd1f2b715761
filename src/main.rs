use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use documind::infrastructure::{
    AppConfig, CliArgs, DocumentQaClient, LoadedConfig, StorageManager,
};
use documind::presentation::{App, AppSettings};
use documind::presentation::ui::PickerOptions;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<LoadedConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut loaded = storage.load_config(args.config.as_deref())?;
    loaded.config.merge_with_args(args);
    Ok(loaded)
}

fn create_app() -> Result<App> {
    let loaded = load_config()?;

    init_logging(&loaded.config)?;
    loaded.log_outcome();

    let config = loaded.config;

    info!(
        version = documind::VERSION,
        base_url = %config.server.base_url,
        "Starting Documind"
    );

    let client = Arc::new(DocumentQaClient::with_base_url(&config.server.base_url)?);
    let settings = AppSettings {
        precise_errors: config.ui.precise_errors,
        picker: PickerOptions {
            start_dir: config.ui.start_dir.clone(),
            show_hidden: config.ui.show_hidden,
        },
    };

    Ok(App::new(client, settings))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
