//! Structured logging.
//!
//! Log levels follow these conventions:
//! - ERROR: rejected configuration blocks
//! - WARN: configuration faults (with file and line)
//! - INFO: configured digipeaters, startup summary
//! - DEBUG: per-frame hop counts and verdicts
//! - TRACE: per-field accounting
//!
//! `RUST_LOG` overrides the configured level.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the tracing subscriber from the `[logging]` section.
pub fn init(config: &LoggingConfig) {
    if config.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter(&config.level))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter(&config.level))
            .init();
    }
}

/// Initialize the tracing subscriber for tests.
///
/// Uses `try_init` to avoid panicking if called multiple times.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("debug"))
        .with_test_writer()
        .try_init();
}
