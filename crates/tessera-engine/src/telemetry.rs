//! Tracing initialisation for hosts that want engine logs.

use tracing_subscriber::EnvFilter;

/// Installs a global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` applies
/// (typically [`crate::EngineConfig::log_filter`]). Safe to call more than
/// once; later calls are ignored.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
