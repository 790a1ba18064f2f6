//! Tracing and logging setup shared by the objkit crates and their tests.

/// Environment-driven settings.
pub mod config;

/// Subscriber installation.
pub mod tracing;

pub use config::{ConfigError, LogFormat, ObservabilityConfig};

/// Initialize process-wide tracing from the environment.
///
/// An unreadable `OBJKIT_LOG_FORMAT` falls back to the defaults. Safe to call
/// multiple times; subsequent calls are no-ops.
pub fn init() {
    let config = ObservabilityConfig::from_env().unwrap_or_default();
    tracing::init(&config);
}
