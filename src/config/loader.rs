use std::path::{Path, PathBuf};
use config::{Config as ConfigLoader, Environment};
use tracing::{info, warn};

use super::schema::Settings;
use crate::error::{AutomaterError, AutomaterResult};

/// Load settings from defaults, an optional file and the environment
pub fn load_settings(config_path: Option<&Path>) -> AutomaterResult<Settings> {
    let defaults = Settings::default();
    let config_error = |path: &Path, e: config::ConfigError| AutomaterError::ConfigLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let default_path = get_default_config_path();

    let mut config_builder = ConfigLoader::builder()
        .set_default("sources_file", defaults.sources_file.to_string_lossy().to_string())
        .and_then(|b| b.set_default("remote_sources_url", defaults.remote_sources_url.clone()))
        .and_then(|b| b.set_default("delay_seconds", defaults.delay_seconds as i64))
        .and_then(|b| b.set_default("user_agent", defaults.user_agent.clone()))
        .and_then(|b| b.set_default("timeout_seconds", defaults.timeout_seconds as i64))
        .map_err(|e| config_error(&default_path, e))?;

    // User-provided configuration
    let source_path = match config_path {
        Some(path) if path.exists() => {
            info!("Loading configuration from: {}", path.display());
            Some(path.to_path_buf())
        }
        Some(path) => {
            warn!("Specified configuration file not found: {}", path.display());
            None
        }
        None if default_path.exists() => {
            info!("Loading configuration from: {}", default_path.display());
            Some(default_path.clone())
        }
        None => None,
    };

    if let Some(path) = &source_path {
        config_builder = config_builder.add_source(config::File::from(path.as_path()));
    }

    // Environment variables
    config_builder = config_builder.add_source(
        Environment::with_prefix("AUTOMATER").try_parsing(true)
    );

    let report_path = source_path.unwrap_or(default_path);
    config_builder
        .build()
        .and_then(|c| c.try_deserialize::<Settings>())
        .map_err(|e| config_error(&report_path, e))
}

/// Get the default configuration path
pub fn get_default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".automater/config.toml")
}

/// Write the default settings to the default location
pub fn init_config(force: bool) -> AutomaterResult<PathBuf> {
    let config_path = get_default_config_path();

    if config_path.exists() && !force {
        return Err(AutomaterError::ConfigLoad {
            path: config_path.clone(),
            message: "configuration already exists, use --force to overwrite".to_string(),
        });
    }

    Settings::default().save(&config_path)?;

    Ok(config_path)
}
