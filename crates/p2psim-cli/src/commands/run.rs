//! # p2psim-cli::commands::run
//!
//! Implements the `run` subcommand: loads a configuration file, wires up a
//! [`Simulation`](p2psim_engine::simulation::Simulation) from it, and drives
//! it to completion.

use crate::{
    args::RunOpts,
    wiring::{apply_seed_override, load_config},
};
use anyhow::{Context, Result};
use p2psim_engine::simulation::Simulation;

pub fn exec(opts: RunOpts) -> Result<()> {
    let config = load_config(&opts.config)?;
    let config = apply_seed_override(config, opts.seed);

    tracing::info!(
        simulation = %config.simulation.name,
        seed = config.simulation.seed,
        nodes = config.setup.node_list.iter().zip(&config.setup.node_count_list).map(|(_, c)| c).sum::<usize>(),
        "loaded configuration"
    );

    let mut sim = Simulation::from_config(&config).context("building simulation from configuration")?;
    sim.run().context("running simulation")?;

    tracing::info!(
        simulation = %sim.name(),
        now = sim.now(),
        nodes = sim.node_count(),
        "simulation run complete"
    );
    println!(
        "simulation '{}' finished at t={:.6} with {} node(s)",
        sim.name(),
        sim.now(),
        sim.node_count()
    );

    Ok(())
}
