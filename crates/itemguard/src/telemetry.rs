//! Logging setup for hosts that have no subscriber of their own.

use tracing_subscriber::EnvFilter;

/// Install a stderr `tracing` subscriber. `RUST_LOG` overrides the level.
///
/// Returns false if a global subscriber was already set.
pub fn init_tracing(verbose: bool) -> bool {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
