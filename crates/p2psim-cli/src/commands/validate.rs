//! # p2psim-cli::commands::validate
//!
//! Implements the `validate` subcommand: parses and checks a configuration
//! file without constructing or running a simulation.

use crate::wiring::load_config;
use anyhow::Result;
use std::path::PathBuf;

pub fn exec(config: PathBuf) -> Result<()> {
    let config = load_config(&config)?;
    println!("configuration '{}' is valid", config.simulation.name);
    Ok(())
}
