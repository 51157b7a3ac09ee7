//! Logging infrastructure for Courtside binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with environment-based filtering (`RUST_LOG`),
/// defaulting to `info`.
pub fn init() {
    init_with_level("info")
}

/// Initialize tracing with a specific default level, still overridable by
/// the `RUST_LOG` environment variable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
