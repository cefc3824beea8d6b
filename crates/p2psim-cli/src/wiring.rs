//! # p2psim-cli::wiring
//!
//! Loads and validates the TOML configuration file shared by every
//! subcommand, registers the built-in defaults for each pluggable role,
//! and applies command-line overrides on top of the parsed config.

use anyhow::{Context, Result};
use p2psim_engine::simulation::register_builtin_defaults;
use p2psim_types::config::Config;
use std::path::Path;

/// Reads and parses `path` into a [`Config`], running the same
/// `setup.validate()` check the CLI's `validate` subcommand exposes
/// directly. Also registers every role's built-in factories, which must
/// happen before `Simulation::from_config` resolves any registry name.
pub fn load_config(path: &Path) -> Result<Config> {
    register_builtin_defaults();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    Config::from_toml_str(&content).with_context(|| format!("parsing config file {}", path.display()))
}

/// Applies the `--seed` override from the command line, if given.
pub fn apply_seed_override(mut config: Config, seed: Option<u64>) -> Config {
    if let Some(seed) = seed {
        config.simulation.seed = seed;
    }
    config
}
