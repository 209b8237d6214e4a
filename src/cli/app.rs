use std::time::Duration;
use anyhow::{Result, Context};
use clap::CommandFactory;
use tracing::{info, debug, warn};

use crate::config::{init_config, Settings, SourcesFile};
use crate::core::source_filter::SourceFilter;
use crate::osint::Dispatcher;
use crate::reporting::{Report, ReportManager};
use crate::utils::http::HttpClient;

use super::commands::Args;

/// The main application struct
pub struct App {
    args: Args,
}

impl App {
    /// Create a new application instance
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Run the application
    pub async fn run(&self) -> Result<()> {
        let args = &self.args;
        let verbose = args.verbose();

        info!("Starting Automater v{}", env!("CARGO_PKG_VERSION"));

        if args.init_config {
            let path = init_config(args.force)?;
            println!("Configuration initialized at {}", path.display());
            return Ok(());
        }

        let Some(input) = args.target_input() else {
            println!("[!] No argument given.");
            Args::command().print_help()?;
            return Ok(());
        };

        let settings = Settings::load(args.config.as_deref())?
            .with_overrides(
                args.sources_file.clone(),
                args.delay,
                args.useragent.clone(),
                args.proxy.clone(),
            );
        debug!("Effective settings: {:?}", settings);

        let client = HttpClient::new(&settings).context("Failed to create HTTP client")?;

        if args.refresh {
            match SourcesFile::refresh(&settings, &client).await {
                Ok(count) => info!("Refreshed {} source definitions", count),
                Err(e) => warn!("Failed to refresh source definitions, using the local copy: {}", e),
            }
        }

        let catalog = SourcesFile::load(&settings.sources_file, verbose)
            .with_context(|| format!(
                "No source definitions could be loaded from {}",
                settings.sources_file.display()
            ))?;

        let filter = SourceFilter::parse(args.source());
        for name in filter.unknown_names(&catalog) {
            warn!("Source {} is not defined in {}", name, settings.sources_file.display());
        }

        let dispatcher = Dispatcher::new(
            Box::new(client),
            catalog,
            Duration::from_secs(settings.delay_seconds),
        );

        let mut targets = Vec::new();
        let results = dispatcher
            .run(input.targets(verbose).inspect(|t| targets.push(t.clone())), &filter)
            .await;

        let report = Report::new(targets, results);
        info!(
            "Queried {} targets, {} findings",
            report.targets.len(),
            report.total_findings()
        );

        let requests = args.report_requests();
        let delivered = ReportManager::new().generate_all(&report, &requests).await;
        if delivered < requests.len() {
            warn!("{} of {} reports could not be written", requests.len() - delivered, requests.len());
        }

        Ok(())
    }
}
