use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

use crate::config::SourceDefinition;
use crate::core::target::TargetKind;

/// Complete report of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub created_at: DateTime<Utc>,
    pub targets: Vec<String>,
    pub results: Vec<SiteResult>,
}

/// Findings of one source for one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteResult {
    pub source_name: String,
    pub friendly_name: String,
    pub target: String,
    pub target_kind: TargetKind,
    pub source_url: String,
    pub important_property: String,
    pub entries: Vec<ResultEntry>,
    pub error: Option<String>,
}

/// Findings extracted by one pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub report_string: String,
    pub findings: Vec<String>,
}

impl Report {
    /// Create a new report
    pub fn new(targets: Vec<String>, results: Vec<SiteResult>) -> Self {
        Self {
            created_at: Utc::now(),
            targets,
            results,
        }
    }

    /// Results grouped by target, in target order
    pub fn results_by_target(&self) -> Vec<(&str, Vec<&SiteResult>)> {
        let mut grouped: Vec<(&str, Vec<&SiteResult>)> = Vec::new();

        for result in &self.results {
            let same_target = grouped
                .last()
                .map_or(false, |(target, _)| *target == result.target);

            match grouped.last_mut() {
                Some((_, results)) if same_target => results.push(result),
                _ => grouped.push((result.target.as_str(), vec![result])),
            }
        }

        grouped
    }

    pub fn total_findings(&self) -> usize {
        self.results.iter().map(SiteResult::finding_count).sum()
    }
}

impl SiteResult {
    pub fn new(source_name: &str, definition: &SourceDefinition, target: &str, target_kind: TargetKind) -> Self {
        Self {
            source_name: source_name.to_string(),
            friendly_name: definition.friendly_name.clone(),
            target: target.to_string(),
            target_kind,
            source_url: definition.source_url.clone(),
            important_property: definition.important_property.clone(),
            entries: Vec::new(),
            error: None,
        }
    }

    pub fn finding_count(&self) -> usize {
        self.entries.iter().map(|e| e.findings.len()).sum()
    }

    pub fn has_findings(&self) -> bool {
        self.finding_count() > 0
    }

    /// Every (label, finding) pair in pattern order
    pub fn findings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|entry| {
            entry
                .findings
                .iter()
                .map(move |finding| (entry.report_string.as_str(), finding.as_str()))
        })
    }
}
