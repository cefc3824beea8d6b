//! # p2psim-engine::prelude
//!
//! Re-exports the types a binary wiring up a simulation run needs most:
//! the orchestrator, the pluggable-role traits, and every registry static.

pub use crate::{
    application::{Application, APPLICATION_REGISTRY},
    behavior::{Behavior, BEHAVIOR_REGISTRY},
    consensus::{Consensus, CONSENSUS_REGISTRY},
    end_condition::{EndCondition, END_CONDITION_REGISTRY},
    errors::{RegistryError, SimError},
    global_network::{GlobalNetwork, GLOBAL_NETWORK_REGISTRY},
    global_state::{GlobalState, GLOBAL_STATE_REGISTRY},
    hooks::{HookBus, HookHandler},
    measurement::{DefaultMeasurementModule, MeasurementModule, MEASUREMENT_REGISTRY},
    node::{Node, NODE_KIND_REGISTRY},
    node_network::{NodeNetwork, NODE_NETWORK_REGISTRY},
    queue::{Destination, Event, EventPayload, EventQueue, EventState},
    sched::Sched,
    simulation::{register_builtin_defaults, Simulation},
};

pub use p2psim_types::{
    self, config::Config, delivery::*, errors::ConfigError, event_type, id::*, message::Message,
    node_type::NodeType, time::SimTime,
};
