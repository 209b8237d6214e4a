pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod osint;
pub mod reporting;
pub mod utils;

// Re-export main types for easier access
pub use cli::{App, Args};
pub use config::{Settings, SourceCatalog, SourceDefinition, SourcesFile};
pub use core::{
    build_target_list,
    SourceFilter,
    TargetInput,
    TargetKind,
    TargetList,
};
pub use error::{AutomaterError, AutomaterResult};
pub use osint::Dispatcher;
pub use reporting::{
    ReportManager,
    ReportFormat,
    Report
};
