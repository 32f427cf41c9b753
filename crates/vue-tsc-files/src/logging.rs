//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter (e.g. `debug`).
pub const LOG_ENV: &str = "VUE_TSC_FILES_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Initializes the tracing subscriber.
///
/// Output goes to stderr without timestamps so vue-tsc's own output on stdout
/// stays untouched. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
