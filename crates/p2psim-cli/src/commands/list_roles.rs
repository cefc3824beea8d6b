//! # p2psim-cli::commands::list_roles
//!
//! Implements the `list-roles` subcommand: registers the built-in defaults
//! for every pluggable role and prints the names bound under each,
//! so a configuration author can see what's available without reading the
//! source.

use anyhow::Result;
use p2psim_engine::{
    application::APPLICATION_REGISTRY, behavior::BEHAVIOR_REGISTRY, consensus::CONSENSUS_REGISTRY,
    end_condition::END_CONDITION_REGISTRY, global_network::GLOBAL_NETWORK_REGISTRY,
    global_state::GLOBAL_STATE_REGISTRY, measurement::MEASUREMENT_REGISTRY,
    node::NODE_KIND_REGISTRY, node_network::NODE_NETWORK_REGISTRY,
    simulation::register_builtin_defaults,
};

pub fn exec() -> Result<()> {
    register_builtin_defaults();

    print_role("node", &NODE_KIND_REGISTRY.names());
    print_role("node_network", &NODE_NETWORK_REGISTRY.names());
    print_role("behavior", &BEHAVIOR_REGISTRY.names());
    print_role("application", &APPLICATION_REGISTRY.names());
    print_role("consensus", &CONSENSUS_REGISTRY.names());
    print_role("global_network", &GLOBAL_NETWORK_REGISTRY.names());
    print_role("global_state", &GLOBAL_STATE_REGISTRY.names());
    print_role("end_condition", &END_CONDITION_REGISTRY.names());
    print_role("measurement_module", &MEASUREMENT_REGISTRY.names());

    Ok(())
}

fn print_role(role: &str, names: &[String]) {
    println!("{role}:");
    for name in names {
        println!("  {name}");
    }
}
