//! # p2psim-cli::logging
//!
//! Wires up `tracing-subscriber` for the binary. Two output shapes are
//! supported, matching `logger.level`/`logger.output_list` in the
//! configuration schema: a human-readable, ANSI-colored line format for
//! interactive terminals, and newline-delimited JSON for log aggregation.

use crate::args::LogFormat;
use tracing_subscriber::EnvFilter;

/// Initializes the global `tracing` subscriber once, at process start.
/// `level` is the default filter directive; it is overridden by `RUST_LOG`
/// when set, matching the rest of the corpus's `EnvFilter` convention.
pub fn init(format: LogFormat, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Human => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(true)
                .init();
        }
    }
}
