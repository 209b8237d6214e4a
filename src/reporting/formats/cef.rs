use crate::error::AutomaterResult;
use crate::reporting::model::Report;
use crate::reporting::format::{ReportFormat, ReportGenerator};

const CEF_VENDOR: &str = "TekDefense";
const CEF_PRODUCT: &str = "Automater";

/// ArcSight Common Event Format, one event per finding
pub struct CefReportGenerator;

impl CefReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for CefReportGenerator {
    fn render(&self, report: &Report) -> AutomaterResult<String> {
        let timestamp = report.created_at.format("%b %d %Y %H:%M:%S");
        let version = env!("CARGO_PKG_VERSION");
        let mut output = String::new();

        for result in report.results.iter().filter(|r| r.has_findings()) {
            for (label, finding) in result.findings() {
                output.push_str(&format!(
                    "{} CEF:0|{}|{}|{}|{}|{}|0|tgt={} src={} prop={} msg={}\n",
                    timestamp,
                    CEF_VENDOR,
                    CEF_PRODUCT,
                    version,
                    escape_header(&result.source_name),
                    escape_header(label),
                    escape_extension(&result.target),
                    escape_extension(&result.source_url),
                    escape_extension(&result.important_property),
                    escape_extension(finding)
                ));
            }
        }

        Ok(output)
    }

    fn supported_format(&self) -> ReportFormat {
        ReportFormat::CEF
    }
}

fn escape_header(value: &str) -> String {
    value.replace('\\', "\\\\").replace('|', "\\|")
}

fn escape_extension(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('=', "\\=")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}
