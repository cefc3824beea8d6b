//! # p2psim-types
//!
//! Foundational, shared data types for the p2psim workspace. This crate
//! exists to break dependency cycles: `p2psim-engine` and `p2psim-cli` both
//! need to agree on node identifiers, the event-type numbering plan, the
//! delivery-mode enumeration, and the configuration schema, without either
//! one owning the other.

#![forbid(unsafe_code)]

pub mod config;
pub mod delivery;
pub mod errors;
pub mod event_type;
pub mod id;
pub mod message;
pub mod node_type;
pub mod time;
