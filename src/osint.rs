// src/osint.rs
mod collector;
mod sources;

pub use collector::Dispatcher;
pub use sources::{extract_findings, SiteFetcher, SourceRequest};

#[cfg(test)]
pub use sources::MockSiteFetcher;
