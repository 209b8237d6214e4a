// src/core/source_filter.rs
use std::collections::BTreeSet;
use tracing::debug;

use crate::config::SourceCatalog;

/// Which configured sources a run should query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceFilter {
    /// Every source in the catalog
    #[default]
    All,
    /// Only the named sources; never empty
    Named(BTreeSet<String>),
}

impl SourceFilter {
    /// Parse a `;`-separated list of source names.
    ///
    /// Tokens are trimmed and empty ones dropped. No filter, or a filter
    /// with no usable names, selects every source.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return SourceFilter::All;
        };

        let names: BTreeSet<String> = raw
            .split(';')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            debug!("Source filter '{}' names no sources, using all sources", raw);
            return SourceFilter::All;
        }

        SourceFilter::Named(names)
    }

    /// Whether a source with this name is selected
    pub fn matches(&self, name: &str) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Named(names) => names.contains(name),
        }
    }

    /// Requested names that the catalog does not define
    pub fn unknown_names(&self, catalog: &SourceCatalog) -> Vec<String> {
        match self {
            SourceFilter::All => Vec::new(),
            SourceFilter::Named(names) => names
                .iter()
                .filter(|name| !catalog.contains_key(name.as_str()))
                .cloned()
                .collect(),
        }
    }
}
