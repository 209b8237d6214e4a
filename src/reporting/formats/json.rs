use crate::error::AutomaterResult;
use crate::reporting::model::Report;
use crate::reporting::format::{ReportFormat, ReportGenerator};

/// JSON report generator
pub struct JsonReportGenerator;

impl JsonReportGenerator {
    /// Create a new JSON report generator
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn render(&self, report: &Report) -> AutomaterResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn supported_format(&self) -> ReportFormat {
        ReportFormat::JSON
    }
}
