//! Console output for the native sink.

use tracing_subscriber::EnvFilter;

/// Target of the crate's own diagnostics (codec clipping and padding,
/// contained solver panics). These bypass the bridge's level filter, so the
/// default console filter leaves them off.
pub const DIAGNOSTIC_TARGET: &str = "dem_bones::diagnostics";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "dem_bones=trace,dem_bones::diagnostics=off";

/// Install a `tracing` fmt subscriber printing bridge events to stderr.
///
/// `RUST_LOG` takes precedence when set. Otherwise every bridge event is
/// printed, since the bridge already applies its own level filter, and
/// [`DIAGNOSTIC_TARGET`] is silenced.
/// Returns `false` if a global subscriber was already installed.
pub fn init_console() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

fn default_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_DIRECTIVES)
}
