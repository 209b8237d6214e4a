use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomaterError {
    #[error("Input read error: {path:?} - {message}")]
    InputRead {
        path: PathBuf,
        message: String,
    },

    #[error("Invalid range: {target} - {message}")]
    InvalidRange {
        target: String,
        message: String,
    },

    #[error("Configuration error: {path:?} - {message}")]
    ConfigLoad {
        path: PathBuf,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Report error: {path:?} - {message}")]
    Report {
        path: PathBuf,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AutomaterError {
    pub(crate) fn invalid_range(target: &str, message: impl Into<String>) -> Self {
        AutomaterError::InvalidRange {
            target: target.to_string(),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for AutomaterError {
    fn from(error: reqwest::Error) -> Self {
        AutomaterError::Network(error.to_string())
    }
}

impl From<serde_json::Error> for AutomaterError {
    fn from(error: serde_json::Error) -> Self {
        AutomaterError::Serialization(error.to_string())
    }
}

pub type AutomaterResult<T> = std::result::Result<T, AutomaterError>;
