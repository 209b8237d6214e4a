// src/config/mod.rs
mod loader;
mod schema;
mod sources;

use std::path::{Path, PathBuf};
use tracing::info;

pub use loader::{get_default_config_path, init_config, load_settings};
pub use schema::{Settings, DEFAULT_REMOTE_SOURCES_URL};
pub use sources::{
    parse_catalog, HttpMethod, SourceCatalog, SourceDefinition, SourcesFile, TARGET_PLACEHOLDER,
};

use crate::error::{AutomaterError, AutomaterResult};

impl Settings {
    /// Load settings from `config_path` or the default location
    pub fn load(config_path: Option<&Path>) -> AutomaterResult<Self> {
        load_settings(config_path)
    }

    /// Save settings to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> AutomaterResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AutomaterError::ConfigLoad {
                    path: parent.to_path_buf(),
                    message: format!("Failed to create directory: {}", e),
                })?;
        }

        let config_str = toml::to_string_pretty(self)
            .map_err(|e| AutomaterError::Serialization(format!("Failed to serialize configuration: {}", e)))?;

        std::fs::write(path, config_str)
            .map_err(|e| AutomaterError::ConfigLoad {
                path: path.to_path_buf(),
                message: format!("Failed to write configuration: {}", e),
            })?;

        info!("Configuration saved to {}", path.display());

        Ok(())
    }

    /// Apply command line overrides on top of the loaded settings
    pub fn with_overrides(
        mut self,
        sources_file: Option<PathBuf>,
        delay_seconds: Option<u64>,
        user_agent: Option<String>,
        proxy: Option<String>,
    ) -> Self {
        if let Some(path) = sources_file {
            self.sources_file = path;
        }
        if let Some(delay) = delay_seconds {
            self.delay_seconds = delay;
        }
        if let Some(agent) = user_agent {
            self.user_agent = agent;
        }
        if proxy.is_some() {
            self.proxy = proxy;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.delay_seconds = 7;
        settings.proxy = Some("127.0.0.1:3128".to_string());
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(Some(&path)).unwrap(), settings);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default().with_overrides(
            Some(PathBuf::from("sites.json")),
            Some(0),
            None,
            Some("proxy:8080".to_string()),
        );

        assert_eq!(settings.sources_file, PathBuf::from("sites.json"));
        assert_eq!(settings.delay_seconds, 0);
        assert_eq!(settings.user_agent, Settings::default().user_agent);
        assert_eq!(settings.proxy.as_deref(), Some("proxy:8080"));
    }
}
