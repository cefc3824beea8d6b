//! # p2psim-types::id
//!
//! Core identifier types. Node IDs are 1-based and assigned in insertion
//! order (see `Simulation::add_node`); `EventId`/`Seq` are monotonic
//! counters minted by the scheduler.

/// A unique identifier for a node in the simulation. 1-based.
pub type NodeId = u32;

/// A unique identifier for a scheduled event.
pub type EventId = u64;

/// The strictly increasing tie-breaker assigned at schedule time.
pub type Seq = u64;
