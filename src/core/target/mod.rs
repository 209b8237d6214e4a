// src/core/target/mod.rs
pub mod classify;
pub mod defang;
pub mod input;
pub mod range;

pub use classify::{is_ip_or_ip_list, IpExpression, TargetKind};
pub use defang::refang;
pub use input::{build_target_list, expand_target, expand_targets, TargetFile, TargetInput, TargetList};
pub use range::{expand, Ipv4Range};
