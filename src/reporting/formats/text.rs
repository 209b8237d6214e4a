use crate::error::AutomaterResult;
use crate::reporting::model::Report;
use crate::reporting::format::{ReportFormat, ReportGenerator};

/// Full plain-text report, used for the console and for `--output`
pub struct TextReportGenerator;

impl TextReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for TextReportGenerator {
    fn render(&self, report: &Report) -> AutomaterResult<String> {
        let mut output = String::new();

        for (target, results) in report.results_by_target() {
            output.push_str(&format!(
                "\n____________________     Results found for: {}     ____________________\n",
                target
            ));

            for result in results {
                if let Some(error) = &result.error {
                    output.push_str(&format!("{} could not be queried: {}\n", result.friendly_name, error));
                    continue;
                }

                for entry in &result.entries {
                    if entry.findings.is_empty() {
                        output.push_str(&format!("No results found for: {}\n", entry.report_string));
                    }
                    for finding in &entry.findings {
                        output.push_str(&format!("{} {}\n", entry.report_string, finding));
                    }
                }
            }
        }

        Ok(output)
    }

    fn supported_format(&self) -> ReportFormat {
        ReportFormat::Text
    }
}

/// Minimal output for bots: one line per finding, nothing else
pub struct BotReportGenerator;

impl BotReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for BotReportGenerator {
    fn render(&self, report: &Report) -> AutomaterResult<String> {
        let mut output = String::new();

        for result in report.results.iter().filter(|r| r.has_findings()) {
            for (label, finding) in result.findings() {
                output.push_str(&format!("{} {} {}\n", result.target, label, finding));
            }
        }

        Ok(output)
    }

    fn supported_format(&self) -> ReportFormat {
        ReportFormat::Bot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::model::fixtures;

    #[test]
    fn test_text_report() {
        let text = TextReportGenerator::new().render(&fixtures::report()).unwrap();

        assert!(text.contains("Results found for: 8.8.8.8"));
        assert!(text.contains("Robtex Host: dns.google\n"));
        assert!(text.contains("No results found for: Empty Host:\n"));
        assert!(text.contains("Down could not be queried: connection refused"));
        assert!(text.find("8.8.8.8").unwrap() < text.find("example.com").unwrap());
    }

    #[test]
    fn test_bot_report_only_has_findings() {
        let text = BotReportGenerator::new().render(&fixtures::report()).unwrap();

        assert_eq!(text, "8.8.8.8 Robtex Host: dns.google\n8.8.8.8 Robtex Host: a,b\n");
    }
}
