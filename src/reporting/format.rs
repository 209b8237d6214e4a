use std::path::PathBuf;
use serde::{Serialize, Deserialize};

use super::model::Report;
use crate::error::AutomaterResult;

/// Report format enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Text,
    Bot,
    CSV,
    HTML,
    CEF,
    JSON,
}

/// Where a rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDestination {
    Stdout,
    File(PathBuf),
}

/// A format and its destination, as requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub format: ReportFormat,
    pub destination: ReportDestination,
}

impl ReportRequest {
    pub fn stdout(format: ReportFormat) -> Self {
        Self {
            format,
            destination: ReportDestination::Stdout,
        }
    }

    pub fn file(format: ReportFormat, path: PathBuf) -> Self {
        Self {
            format,
            destination: ReportDestination::File(path),
        }
    }
}

/// Report generator trait
pub trait ReportGenerator: Send + Sync {
    /// Render a report in a specific format
    fn render(&self, report: &Report) -> AutomaterResult<String>;

    /// Get the supported format
    fn supported_format(&self) -> ReportFormat;
}
