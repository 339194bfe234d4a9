//! Diagnostic logging setup.

use crate::cli::LogLevel;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy();

    // A subscriber may already be installed by a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
