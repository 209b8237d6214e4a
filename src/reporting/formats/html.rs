// src/reporting/formats/html.rs
use crate::error::AutomaterResult;
use crate::reporting::model::Report;
use crate::reporting::format::{ReportFormat, ReportGenerator};

/// HTML report generator
pub struct HtmlReportGenerator;

impl HtmlReportGenerator {
    /// Create a new HTML report generator
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for HtmlReportGenerator {
    fn render(&self, report: &Report) -> AutomaterResult<String> {
        let mut rows = String::new();

        for result in &report.results {
            let source = format!(
                "<a href=\"{}\" target=\"_blank\">{}</a>",
                html_encode(&result.source_url),
                html_encode(&result.friendly_name)
            );

            let mut cells: Vec<String> = result
                .findings()
                .map(|(label, finding)| format!("{} {}", html_encode(label), html_encode(finding)))
                .collect();

            if let Some(error) = &result.error {
                cells.push(format!("<span class=\"error\">Query failed: {}</span>", html_encode(error)));
            } else if cells.is_empty() {
                cells.push("No results found".to_string());
            }

            for cell in cells {
                rows.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    html_encode(&result.target),
                    result.target_kind,
                    source,
                    cell
                ));
            }
        }

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Automater Results</title>
<style>
body {{ font-family: sans-serif; }}
table {{ border-collapse: collapse; }}
th, td {{ border: 1px solid #999; padding: 4px 8px; text-align: left; }}
.error {{ color: #a00; }}
</style>
</head>
<body>
<h1>Automater Results</h1>
<p>Generated {generated} for {targets} targets, {findings} findings.</p>
<table>
<tr><th>Target</th><th>Type</th><th>Source</th><th>Result</th></tr>
{rows}</table>
</body>
</html>
"#,
            generated = report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            targets = report.targets.len(),
            findings = report.total_findings(),
            rows = rows,
        ))
    }

    fn supported_format(&self) -> ReportFormat {
        ReportFormat::HTML
    }
}

// Helper function to encode HTML special characters
fn html_encode(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
