//! Logging setup

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// Verbosity follows `RUST_LOG` (for example `RUST_LOG=jewellery_mart=debug`)
/// and defaults to `info`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
