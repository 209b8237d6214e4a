use csv::Writer;

use crate::error::{AutomaterError, AutomaterResult};
use crate::reporting::model::Report;
use crate::reporting::format::{ReportFormat, ReportGenerator};

/// CSV report, one row per finding
pub struct CsvReportGenerator;

impl CsvReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for CsvReportGenerator {
    fn render(&self, report: &Report) -> AutomaterResult<String> {
        let mut wtr = Writer::from_writer(vec![]);

        wtr.write_record(["Target", "Type", "Source", "Result"])
            .map_err(csv_error)?;

        for result in &report.results {
            let kind = result.target_kind.to_string();
            let mut row = |value: &str| {
                wtr.write_record([
                    result.target.as_str(),
                    kind.as_str(),
                    result.friendly_name.as_str(),
                    value,
                ])
            };

            if let Some(error) = &result.error {
                row(&format!("Query failed: {}", error)).map_err(csv_error)?;
            } else if !result.has_findings() {
                row("No results found").map_err(csv_error)?;
            } else {
                for (_, finding) in result.findings() {
                    row(finding).map_err(csv_error)?;
                }
            }
        }

        let data = wtr.into_inner()
            .map_err(|e| AutomaterError::Serialization(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(data)
            .map_err(|e| AutomaterError::Serialization(format!("CSV is not valid UTF-8: {}", e)))
    }

    fn supported_format(&self) -> ReportFormat {
        ReportFormat::CSV
    }
}

fn csv_error(e: csv::Error) -> AutomaterError {
    AutomaterError::Serialization(format!("Failed to write CSV row: {}", e))
}
