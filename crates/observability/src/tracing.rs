//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Default filter: service at `info`, sqlx statement logging kept quiet
/// unless asked for via `RUST_LOG`.
const FILTRO_PADRAO: &str = "info,sqlx=warn";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(FILTRO_PADRAO));

    // JSON lines, overridable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
