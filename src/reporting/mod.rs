mod format;
mod generator;
mod model;
pub mod formats;

pub use format::{ReportDestination, ReportFormat, ReportGenerator, ReportRequest};
pub use generator::ReportManager;
pub use model::{Report, ResultEntry, SiteResult};
