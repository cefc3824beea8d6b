//! # p2psim-types::errors
//!
//! Configuration-layer errors: anything that can go wrong reading and
//! validating a run's TOML before a single event is scheduled. Fatal
//! registry and in-run errors live in `p2psim-engine`, which depends on
//! this crate rather than the other way around.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing required config key: {0}")]
    Missing(&'static str),

    #[error("{key} has length {got}, expected {expected} to match setup.node_list")]
    ListLengthMismatch {
        key: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("unknown distribution kind {0:?}")]
    UnknownDistribution(String),

    #[error("invalid numeric parameter {value:?} for {key}: {source}")]
    InvalidNumber {
        key: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

impl ConfigError {
    pub fn io(path: impl Into<std::path::PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
