//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system for a driver binary
///
/// `RUST_LOG` overrides the `info` default. Panics if a global logger was
/// already installed; code that may run more than once should use [`try_init`].
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

/// Initialize the logging system, ignoring an already-installed logger
pub fn try_init() -> bool {
    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
