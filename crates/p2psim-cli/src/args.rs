//! # p2psim-cli::args
//!
//! Defines the command-line argument structure using `clap`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, default_value = "human")]
    pub log: LogFormat,

    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a simulation from a TOML configuration file.
    Run(RunOpts),
    /// List every name currently bound in each pluggable-role registry.
    ListRoles,
    /// Validate a configuration file without running it.
    Validate {
        #[arg(value_name = "CONFIG_PATH")]
        config: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct RunOpts {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "CONFIG_PATH")]
    pub config: PathBuf,

    /// Override `simulation.seed` from the configuration file.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}
