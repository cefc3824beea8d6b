//! # p2psim-engine::errors
//!
//! Two error families. [`RegistryError`] surfaces duplicate-registration
//! and unknown-name lookups from the pluggable-role registries; it is
//! fatal in the sense that it always propagates into a [`SimError`] and
//! stops the run before any event fires, not in the sense of an `std`
//! process panic. [`SimError`] is returned from fallible `Simulation`
//! entry points such as `run()` and `remove_node()`.

use p2psim_types::{errors::ConfigError, id::NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{role} factory {name:?} already registered")]
    DuplicateRegistration { role: &'static str, name: String },

    #[error("no {role} factory registered under {name:?}")]
    NotFound { role: &'static str, name: String },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("cannot run: end condition is not set")]
    EndConditionNotSet,

    #[error("cannot run: global network is not set")]
    GlobalNetworkNotSet,

    #[error("no node with id {0}")]
    UnknownNodeId(NodeId),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("sampler error: {0}")]
    Sampler(String),

    #[error("end condition {name:?}: invalid argument {arg:?}: {source}")]
    EndConditionArg {
        name: &'static str,
        arg: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}
