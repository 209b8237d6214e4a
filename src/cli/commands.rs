use clap::Parser;
use std::path::{Path, PathBuf};

use crate::core::target::TargetInput;
use crate::reporting::{ReportFormat, ReportRequest};

#[derive(Parser, Debug)]
#[command(name = "automater", version)]
#[command(about = "IP, URL, and Hash Passive Analysis tool")]
pub struct Args {
    #[arg(help = "IP address (CIDR or dash notation accepted), URL or hash, or a file with one per line")]
    pub target: Option<String>,

    #[arg(short, long, help = "Write the text report to a file")]
    pub output: Option<PathBuf>,

    #[arg(short, long, help = "Print minimized results for a bot")]
    pub bot: bool,

    #[arg(short = 'f', long, help = "Write a CEF formatted report to a file")]
    pub cef: Option<PathBuf>,

    #[arg(short, long, help = "Write an HTML report to a file")]
    pub web: Option<PathBuf>,

    #[arg(short, long, help = "Write a CSV report to a file")]
    pub csv: Option<PathBuf>,

    #[arg(short, long, help = "Write a JSON report to a file")]
    pub json: Option<PathBuf>,

    #[arg(short, long, help = "Seconds to wait between requests (default 2)")]
    pub delay: Option<u64>,

    #[arg(short, long, help = "Only query these sources, separated by semicolons")]
    pub source: Option<String>,

    #[arg(long, help = "Proxy for web requests (e.g. proxy.example.com:8080)")]
    pub proxy: Option<String>,

    #[arg(short = 'a', long, help = "User-agent header for web requests")]
    pub useragent: Option<String>,

    #[arg(short, long, help = "Refresh the source definitions file from the remote copy")]
    pub refresh: bool,

    #[arg(short, long, help = "Print diagnostic messages")]
    pub verbose: bool,

    #[arg(long, help = "Settings file (default ~/.automater/config.toml)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Source definitions file")]
    pub sources_file: Option<PathBuf>,

    #[arg(long, help = "Write the default settings file and exit")]
    pub init_config: bool,

    #[arg(long, requires = "init_config", help = "Overwrite an existing settings file")]
    pub force: bool,
}

impl Args {
    /// Whether the target argument names an existing file
    pub fn has_input_file(&self) -> bool {
        self.input_file().is_some()
    }

    pub fn input_file(&self) -> Option<&Path> {
        self.target
            .as_deref()
            .map(Path::new)
            .filter(|path| path.is_file())
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// The target argument as a file or a single target
    pub fn target_input(&self) -> Option<TargetInput> {
        if let Some(path) = self.input_file() {
            return Some(TargetInput::File(path.to_path_buf()));
        }
        self.target().map(|target| TargetInput::Single(target.to_string()))
    }

    /// Console output plus every requested report file
    pub fn report_requests(&self) -> Vec<ReportRequest> {
        let console = if self.bot { ReportFormat::Bot } else { ReportFormat::Text };
        let mut requests = vec![ReportRequest::stdout(console)];

        let files = [
            (ReportFormat::Text, &self.output),
            (ReportFormat::CEF, &self.cef),
            (ReportFormat::HTML, &self.web),
            (ReportFormat::CSV, &self.csv),
            (ReportFormat::JSON, &self.json),
        ];

        for (format, path) in files {
            if let Some(path) = path {
                requests.push(ReportRequest::file(format, path.clone()));
            }
        }

        requests
    }
}
