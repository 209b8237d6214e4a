// src/osint/collector.rs
use std::time::Duration;
use tracing::{info, warn, debug};

use super::sources::{extract_findings, SiteFetcher, SourceRequest};
use crate::config::{SourceCatalog, SourceDefinition};
use crate::core::source_filter::SourceFilter;
use crate::core::target::TargetKind;
use crate::reporting::SiteResult;

/// Runs every selected source against every target
pub struct Dispatcher {
    fetcher: Box<dyn SiteFetcher>,
    catalog: SourceCatalog,
    delay: Duration,
}

impl Dispatcher {
    pub fn new(fetcher: Box<dyn SiteFetcher>, catalog: SourceCatalog, delay: Duration) -> Self {
        Self {
            fetcher,
            catalog,
            delay,
        }
    }

    /// Sources that apply to a target: selected by the filter and accepting
    /// the target's kind
    pub fn sources_for<'a>(
        &'a self,
        kind: TargetKind,
        filter: &'a SourceFilter,
    ) -> impl Iterator<Item = (&'a String, &'a SourceDefinition)> + 'a {
        self.catalog
            .iter()
            .filter(move |(name, definition)| filter.matches(name) && definition.entry_type == kind)
    }

    /// Query a single source for a single target. Failures are recorded on
    /// the result, never returned.
    pub async fn query(&self, name: &str, definition: &SourceDefinition, target: &str) -> SiteResult {
        let kind = TargetKind::detect(target);
        let request = SourceRequest::build(name, definition, target);
        let mut result = SiteResult::new(name, definition, target, kind);

        match self.fetcher.fetch(&request).await {
            Ok(body) => {
                result.entries = extract_findings(definition, &body);
                debug!("{} returned {} findings for {}", name, result.finding_count(), target);
            }
            Err(e) => {
                warn!("Failed to query {} for {}: {}", name, target, e);
                result.error = Some(e.to_string());
            }
        }

        result
    }

    /// Query all targets in order, pausing between consecutive requests
    pub async fn run<I>(&self, targets: I, filter: &SourceFilter) -> Vec<SiteResult>
    where
        I: IntoIterator<Item = String>,
    {
        let mut results = Vec::new();
        let mut first_request = true;

        for target in targets {
            let kind = TargetKind::detect(&target);
            let sources: Vec<_> = self.sources_for(kind, filter).collect();

            if sources.is_empty() {
                info!("No selected sources accept {} targets ({})", kind, target);
                continue;
            }

            info!("Querying {} sources for {}", sources.len(), target);

            for (name, definition) in sources {
                if !first_request && !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                first_request = false;

                results.push(self.query(name, definition, &target).await);
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutomaterError;
    use crate::osint::MockSiteFetcher;

    fn catalog() -> SourceCatalog {
        let mut robtex = SourceDefinition::new("Robtex", TargetKind::Ip, "https://robtex.example/%TARGET%");
        robtex.regex = vec![r"host=(\S+)".to_string()];

        let mut hashes = SourceDefinition::new("HashLookup", TargetKind::Hash, "https://hash.example/%TARGET%");
        hashes.regex = vec![r"verdict=(\w+)".to_string()];

        let mut urls = SourceDefinition::new("UrlLookup", TargetKind::Hostname, "https://url.example/?q=%TARGET%");
        urls.regex = vec![r"category=(\w+)".to_string()];

        let mut catalog = SourceCatalog::new();
        catalog.insert("robtex".to_string(), robtex);
        catalog.insert("hashlookup".to_string(), hashes);
        catalog.insert("urllookup".to_string(), urls);
        catalog
    }

    fn canned_fetcher() -> MockSiteFetcher {
        let mut fetcher = MockSiteFetcher::new();
        fetcher.expect_fetch().returning(|request| match request.source_name.as_str() {
            "robtex" => Ok(format!("host=a.example host=b.example url={}", request.url)),
            "hashlookup" => Ok("verdict=malicious".to_string()),
            _ => Err(AutomaterError::Network("connection refused".to_string())),
        });
        fetcher
    }

    #[tokio::test]
    async fn test_run_matches_sources_by_kind() {
        let dispatcher = Dispatcher::new(Box::new(canned_fetcher()), catalog(), Duration::ZERO);
        let targets = vec![
            "8.8.8.8".to_string(),
            "d41d8cd98f00b204e9800998ecf8427e".to_string(),
            "example.com".to_string(),
        ];

        let results = dispatcher.run(targets, &SourceFilter::All).await;

        assert_eq!(results.len(), 3);

        assert_eq!(results[0].source_name, "robtex");
        assert_eq!(results[0].target, "8.8.8.8");
        assert_eq!(results[0].entries[0].findings, vec!["a.example", "b.example"]);

        assert_eq!(results[1].source_name, "hashlookup");
        assert_eq!(results[1].entries[0].findings, vec!["malicious"]);

        assert_eq!(results[2].source_name, "urllookup");
        assert!(results[2].error.is_some());
        assert!(!results[2].has_findings());
    }

    #[tokio::test]
    async fn test_run_respects_filter() {
        let mut fetcher = MockSiteFetcher::new();
        fetcher.expect_fetch().times(2).returning(|_| Ok("host=x.example".to_string()));

        let dispatcher = Dispatcher::new(Box::new(fetcher), catalog(), Duration::ZERO);
        let filter = SourceFilter::parse(Some("robtex"));
        let targets = vec![
            "1.1.1.1".to_string(),
            "d41d8cd98f00b204e9800998ecf8427e".to_string(),
            "1.1.1.1".to_string(),
        ];

        let results = dispatcher.run(targets, &filter).await;

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.source_name == "robtex"));
    }

    #[tokio::test]
    async fn test_run_without_matching_sources() {
        let mut fetcher = MockSiteFetcher::new();
        fetcher.expect_fetch().never();

        let dispatcher = Dispatcher::new(Box::new(fetcher), SourceCatalog::new(), Duration::ZERO);
        let results = dispatcher.run(vec!["8.8.8.8".to_string()], &SourceFilter::All).await;

        assert!(results.is_empty());
    }
}
