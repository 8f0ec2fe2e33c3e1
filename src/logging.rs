//! Logging setup
//!
//! Library code only emits `tracing` events. Binaries call [`init`] once to
//! install a stderr subscriber.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber.
///
/// Filter precedence: `explicit` (e.g. a `--log` flag), then `RUST_LOG`,
/// then `default_filter` (usually from configuration). An invalid
/// directive falls through to the next source. Calling this twice is
/// harmless; the second call is ignored.
pub fn init(explicit: Option<&str>, default_filter: &str) {
    let filter = explicit
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
