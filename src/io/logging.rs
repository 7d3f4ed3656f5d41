//! Structured logging setup

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for the given verbosity
pub fn default_directive(quiet: bool) -> String {
    let level = if quiet { "warn" } else { "info" };
    format!("{}={level}", env!("CARGO_PKG_NAME"))
}

/// Build the log filter, preferring `RUST_LOG` when it is set and valid
pub fn build_filter(quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(quiet)))
}

/// Install the global subscriber writing to stderr
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(quiet: bool) -> bool {
    tracing_subscriber::registry()
        .with(build_filter(quiet))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .is_ok()
}
