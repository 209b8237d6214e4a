use serde::{Serialize, Deserialize};
use std::path::PathBuf;

/// Default location of the source definitions document
pub const DEFAULT_REMOTE_SOURCES_URL: &str =
    "https://raw.githubusercontent.com/tobias1012/TekDefense-Automater/master/tobdefense.json";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Local source definitions file
    pub sources_file: PathBuf,
    /// Where `--refresh` downloads the source definitions from
    pub remote_sources_url: String,
    /// Pause between two consecutive source requests
    pub delay_seconds: u64,
    pub user_agent: String,
    pub proxy: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sources_file: PathBuf::from("tobdefense.json"),
            remote_sources_url: DEFAULT_REMOTE_SOURCES_URL.to_string(),
            delay_seconds: 2,
            user_agent: format!("Automater/{}", env!("CARGO_PKG_VERSION")),
            proxy: None,
            timeout_seconds: 30,
        }
    }
}
