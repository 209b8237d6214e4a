use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tracing::{info, debug, warn};

use super::model::Report;
use super::format::{ReportDestination, ReportFormat, ReportGenerator, ReportRequest};
use super::formats::cef::CefReportGenerator;
use super::formats::csv::CsvReportGenerator;
use super::formats::html::HtmlReportGenerator;
use super::formats::json::JsonReportGenerator;
use super::formats::text::{BotReportGenerator, TextReportGenerator};
use crate::error::{AutomaterError, AutomaterResult};

/// Report generation manager
pub struct ReportManager {
    generators: HashMap<ReportFormat, Box<dyn ReportGenerator>>,
}

impl ReportManager {
    /// Create a new report manager with every built-in format
    pub fn new() -> Self {
        let mut manager = Self {
            generators: HashMap::new(),
        };

        manager.register_generator(Box::new(TextReportGenerator::new()));
        manager.register_generator(Box::new(BotReportGenerator::new()));
        manager.register_generator(Box::new(CsvReportGenerator::new()));
        manager.register_generator(Box::new(HtmlReportGenerator::new()));
        manager.register_generator(Box::new(CefReportGenerator::new()));
        manager.register_generator(Box::new(JsonReportGenerator::new()));

        manager
    }

    /// Register a new report generator
    pub fn register_generator(&mut self, generator: Box<dyn ReportGenerator>) {
        let format = generator.supported_format();
        debug!("Registering report generator for format: {:?}", format);
        self.generators.insert(format, generator);
    }

    /// Render a report in a specific format
    pub fn render(&self, report: &Report, format: ReportFormat) -> AutomaterResult<String> {
        let generator = self.generators.get(&format)
            .ok_or_else(|| AutomaterError::InvalidInput(format!("No generator found for format {:?}", format)))?;

        generator.render(report)
    }

    /// Render a report and deliver it to its destination
    pub async fn generate_report(&self, report: &Report, request: &ReportRequest) -> AutomaterResult<()> {
        let content = self.render(report, request.format)?;

        match &request.destination {
            ReportDestination::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(content.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(|e| report_error(Path::new("<stdout>"), e))?;
            }
            ReportDestination::File(path) => {
                info!("Writing {:?} report to {}", request.format, path.display());
                tokio::fs::write(path, content).await
                    .map_err(|e| report_error(path, e))?;
            }
        }

        Ok(())
    }

    /// Deliver a report for every request; a failing format does not stop
    /// the others. Returns the number of reports delivered.
    pub async fn generate_all(&self, report: &Report, requests: &[ReportRequest]) -> usize {
        let mut delivered = 0;

        for request in requests {
            match self.generate_report(report, request).await {
                Ok(()) => delivered += 1,
                Err(e) => warn!("Failed to generate {:?} report: {}", request.format, e),
            }
        }

        delivered
    }
}

impl Default for ReportManager {
    fn default() -> Self {
        Self::new()
    }
}

fn report_error(path: &Path, e: std::io::Error) -> AutomaterError {
    AutomaterError::Report {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
