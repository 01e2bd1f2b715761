use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Configuration read from disk, with what happened while reading it.
///
/// Loading runs before logging is set up, so events are kept here and
/// reported later through [`LoadedConfig::log_outcome`].
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// Whether the file was missing and defaults were written.
    pub created_default: bool,
    /// Why an existing file was ignored in favour of defaults.
    pub parse_error: Option<toml::de::Error>,
}

impl LoadedConfig {
    pub fn log_outcome(&self) {
        let path = self.config.config.as_deref().map(Path::display);
        if let Some(e) = &self.parse_error {
            warn!(path = ?path, error = %e, "Failed to parse config file, using defaults");
        } else if self.created_default {
            info!(path = ?path, "Config file not found, wrote defaults");
        } else {
            info!(path = ?path, "Configuration loaded");
        }
    }
}

pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Create a new `StorageManager` rooted at the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Loads the application configuration, writing defaults when missing.
    ///
    /// A malformed file is left untouched and defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        let config_path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            Path::to_path_buf,
        );

        let mut loaded = if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            match toml::from_str::<AppConfig>(&content) {
                Ok(config) => LoadedConfig {
                    config,
                    created_default: false,
                    parse_error: None,
                },
                Err(e) => LoadedConfig {
                    config: AppConfig::default(),
                    created_default: false,
                    parse_error: Some(e),
                },
            }
        } else {
            let config = AppConfig::default();
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            Self::save_to_file(&config_path, &config)?;
            LoadedConfig {
                config,
                created_default: true,
                parse_error: None,
            }
        };

        loaded.config.config = Some(config_path);
        Ok(loaded)
    }

    fn save_to_file<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(data)?;

        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid path"))?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}
