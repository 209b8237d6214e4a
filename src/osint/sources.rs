// src/osint/sources.rs
use std::collections::HashMap;
use async_trait::async_trait;
use regex::Regex;
use tracing::warn;

use crate::config::{HttpMethod, SourceDefinition, TARGET_PLACEHOLDER};
use crate::error::AutomaterResult;
use crate::reporting::ResultEntry;

/// Performs the request for one source lookup
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteFetcher: Send + Sync {
    /// Send the request and return the response body
    async fn fetch(&self, request: &SourceRequest) -> AutomaterResult<String>;
}

/// A source lookup with the target filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRequest {
    pub source_name: String,
    pub url: String,
    pub method: HttpMethod,
    pub body: Option<String>,
    pub headers: HashMap<String, String>,
}

impl SourceRequest {
    pub fn build(source_name: &str, definition: &SourceDefinition, target: &str) -> Self {
        Self {
            source_name: source_name.to_string(),
            url: definition.full_url.replace(TARGET_PLACEHOLDER, target),
            method: definition.method,
            body: definition
                .post_data
                .as_ref()
                .map(|data| data.replace(TARGET_PLACEHOLDER, target)),
            headers: definition.headers.clone(),
        }
    }
}

/// Apply every pattern of a source to a response body.
///
/// Each match contributes its first capture group, or the whole match when
/// the pattern has no groups. Repeats within one pattern are dropped.
pub fn extract_findings(definition: &SourceDefinition, body: &str) -> Vec<ResultEntry> {
    definition
        .regex
        .iter()
        .enumerate()
        .map(|(index, pattern)| {
            let findings = match Regex::new(pattern) {
                Ok(regex) => matches_in(&regex, body),
                Err(e) => {
                    warn!("Invalid pattern for {}: {}", definition.friendly_name, e);
                    Vec::new()
                }
            };

            ResultEntry {
                report_string: definition.report_string(index),
                findings,
            }
        })
        .collect()
}

fn matches_in(regex: &Regex, body: &str) -> Vec<String> {
    let mut findings: Vec<String> = Vec::new();

    for captures in regex.captures_iter(body) {
        let Some(found) = captures.get(1).or_else(|| captures.get(0)) else {
            continue;
        };

        let value = found.as_str().trim();
        if !value.is_empty() && !findings.iter().any(|f| f == value) {
            findings.push(value.to_string());
        }
    }

    findings
}
