// src/core/target/input.rs
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::classify::is_ip_or_ip_list;
use super::defang::refang;
use super::range::expand;
use crate::diagnostics;
use crate::error::AutomaterError;

/// Ordered, flattened list of atomic targets. Duplicates are kept.
pub type TargetList = Vec<String>;

/// Where raw targets come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetInput {
    /// A file with one raw target per line
    File(PathBuf),
    /// A single target given on the command line
    Single(String),
}

/// Single-pass reader over the lines of a target file.
///
/// Lines are trimmed and blank lines skipped rather than yielded as empty
/// targets, so an empty line is never sent to a lookup source. A failure to
/// open or read the file is reported on the diagnostic sink and ends the
/// iteration; the file handle is dropped at that point.
pub struct TargetFile {
    path: PathBuf,
    lines: Option<Lines<BufReader<File>>>,
    verbose: bool,
}

impl TargetFile {
    pub fn open(path: &Path, verbose: bool) -> Self {
        let lines = match File::open(path) {
            Ok(file) => Some(BufReader::new(file).lines()),
            Err(e) => {
                report_read_error(path, &e.to_string(), verbose);
                None
            }
        };

        Self {
            path: path.to_path_buf(),
            lines,
            verbose,
        }
    }
}

impl Iterator for TargetFile {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.as_mut()?.next() {
                Some(Ok(line)) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        return Some(line.to_string());
                    }
                }
                Some(Err(e)) => {
                    report_read_error(&self.path, &e.to_string(), self.verbose);
                    self.lines = None;
                    return None;
                }
                None => {
                    self.lines = None;
                    return None;
                }
            }
        }
    }
}

fn report_read_error(path: &Path, message: &str, verbose: bool) {
    let error = AutomaterError::InputRead {
        path: path.to_path_buf(),
        message: message.to_string(),
    };
    diagnostics::report(
        &format!("There was an error reading from the target input file: {}", error),
        verbose,
    );
}

/// Turn one raw target into its atomic targets.
///
/// IP expressions are expanded lazily; anything else is passed through
/// refanged. A bad range is reported and contributes nothing.
pub fn expand_target(raw: &str, verbose: bool) -> Box<dyn Iterator<Item = String>> {
    let target = refang(raw);

    if !is_ip_or_ip_list(&target) {
        return Box::new(std::iter::once(target));
    }

    match expand(&target) {
        Ok(addresses) => Box::new(addresses),
        Err(e) => {
            diagnostics::report(&format!("Skipping target: {}", e), verbose);
            Box::new(std::iter::empty())
        }
    }
}

/// Lazily expand a stream of raw targets, preserving input order.
pub fn expand_targets<I>(raw_targets: I, verbose: bool) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = String>,
{
    raw_targets
        .into_iter()
        .flat_map(move |raw| expand_target(&raw, verbose))
}

impl TargetInput {
    /// Raw targets as a stream: file lines or a one-element stream
    pub fn raw_targets(&self, verbose: bool) -> Box<dyn Iterator<Item = String>> {
        match self {
            TargetInput::File(path) => Box::new(TargetFile::open(path, verbose)),
            TargetInput::Single(target) => Box::new(std::iter::once(target.clone())),
        }
    }

    /// Lazily produce every atomic target for this input
    pub fn targets(&self, verbose: bool) -> impl Iterator<Item = String> {
        expand_targets(self.raw_targets(verbose), verbose)
    }
}

/// Build the complete target list for an input
pub fn build_target_list(input: &TargetInput, verbose: bool) -> TargetList {
    let targets: TargetList = input.targets(verbose).collect();
    debug!("Built target list with {} entries", targets.len());
    targets
}
