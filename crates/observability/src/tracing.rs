//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Defaults to `info` with sqlx statement logging reduced to warnings;
/// override with `RUST_LOG`. Output is JSON unless `RAILSTOCK_LOG_PRETTY` is
/// set (human-readable output for local runs). Safe to call multiple times
/// (subsequent calls are no-ops).
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if std::env::var_os("RAILSTOCK_LOG_PRETTY").is_some() {
        let _ = builder.pretty().try_init();
    } else {
        let _ = builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init();
    }
}
