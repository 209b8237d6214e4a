// src/config/sources.rs
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use serde::{Serialize, Deserialize};
use tracing::info;

use super::schema::Settings;
use crate::core::target::TargetKind;
use crate::diagnostics;
use crate::error::{AutomaterError, AutomaterResult};
use crate::utils::http::HttpClient;

/// Placeholder replaced by the target in URLs and POST bodies
pub const TARGET_PLACEHOLDER: &str = "%TARGET%";

/// Configured lookup sources keyed by source name
pub type SourceCatalog = BTreeMap<String, SourceDefinition>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    #[serde(rename = "GET", alias = "get")]
    Get,
    #[serde(rename = "POST", alias = "post")]
    Post,
}

/// How to query one passive lookup source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDefinition {
    pub friendly_name: String,
    pub entry_type: TargetKind,
    /// Site shown in reports
    #[serde(default)]
    pub source_url: String,
    /// Request URL, with `%TARGET%` standing in for the target
    pub full_url: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub post_data: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Extraction patterns, one finding list per pattern
    #[serde(default)]
    pub regex: Vec<String>,
    /// Labels for the findings of each pattern, parallel to `regex`
    #[serde(default)]
    pub report_strings: Vec<String>,
    #[serde(default)]
    pub important_property: String,
}

impl SourceDefinition {
    pub fn new(friendly_name: &str, entry_type: TargetKind, full_url: &str) -> Self {
        Self {
            friendly_name: friendly_name.to_string(),
            entry_type,
            source_url: String::new(),
            full_url: full_url.to_string(),
            method: HttpMethod::Get,
            post_data: None,
            headers: HashMap::new(),
            regex: Vec::new(),
            report_strings: Vec::new(),
            important_property: String::new(),
        }
    }

    /// Label for the findings of the pattern at `index`
    pub fn report_string(&self, index: usize) -> String {
        self.report_strings
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("{} Result:", self.friendly_name))
    }
}

/// The JSON file of source definitions
pub struct SourcesFile;

impl SourcesFile {
    /// Whether `path` is an existing regular file
    pub fn exists(path: &Path) -> bool {
        path.is_file()
    }

    /// Load the catalog, reporting failures instead of returning them.
    ///
    /// `None` means the file was missing or unreadable; a valid file with no
    /// sources gives `Some` of an empty catalog.
    pub fn load(path: &Path, verbose: bool) -> Option<SourceCatalog> {
        if !Self::exists(path) {
            diagnostics::report(&format!("No local {} file present.", path.display()), verbose);
            return None;
        }

        match Self::try_load(path) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                diagnostics::report(
                    &format!(
                        "There was an error reading from the {} input file. \
                         Please check that the file is present and correctly formatted: {}",
                        path.display(),
                        e
                    ),
                    verbose,
                );
                None
            }
        }
    }

    /// Load the catalog, returning `ConfigLoad` on any failure
    pub fn try_load(path: &Path) -> AutomaterResult<SourceCatalog> {
        let config_error = |message: String| AutomaterError::ConfigLoad {
            path: path.to_path_buf(),
            message,
        };

        if path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("xml")) {
            return Err(config_error(
                "legacy XML source definitions are not supported, use the JSON format".to_string(),
            ));
        }

        let json = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let catalog = parse_catalog(&json).map_err(|e| config_error(e.to_string()))?;

        info!("Loaded {} source definitions from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Replace the local sources file with the remote copy.
    ///
    /// The download is parsed before it is written so a bad remote document
    /// never clobbers a working local file.
    pub async fn refresh(settings: &Settings, client: &HttpClient) -> AutomaterResult<usize> {
        info!("Refreshing {} from {}", settings.sources_file.display(), settings.remote_sources_url);

        let body = client.get_text(&settings.remote_sources_url).await?;
        let catalog = parse_catalog(&body)?;

        tokio::fs::write(&settings.sources_file, body).await
            .map_err(|e| AutomaterError::ConfigLoad {
                path: settings.sources_file.clone(),
                message: format!("Failed to write sources file: {}", e),
            })?;

        Ok(catalog.len())
    }
}

/// Parse a JSON source definitions document
pub fn parse_catalog(json: &str) -> AutomaterResult<SourceCatalog> {
    Ok(serde_json::from_str(json)?)
}
