// src/diagnostics.rs
use tracing::{debug, warn};

/// Report a non-fatal problem to the user.
///
/// Shared by the target reader and the sources loader. The message is only
/// surfaced when `verbose` is set; otherwise it stays at debug level.
pub fn report(message: &str, verbose: bool) {
    if verbose {
        warn!("{}", message);
    } else {
        debug!("{}", message);
    }
}
