pub mod source_filter;
pub mod target;

pub use source_filter::SourceFilter;
pub use target::{build_target_list, TargetInput, TargetKind, TargetList};
