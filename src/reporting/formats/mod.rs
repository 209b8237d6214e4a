pub mod cef;
pub mod csv;
pub mod html;
pub mod json;
pub mod text;

pub use super::format::{ReportDestination, ReportFormat, ReportGenerator, ReportRequest};
