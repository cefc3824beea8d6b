//! # p2psim-cli
//!
//! The command-line entry point for the p2psim discrete-event simulator.
//! Parses arguments, sets up `tracing`, and dispatches to a subcommand.

#![forbid(unsafe_code)]

use crate::args::{Cli, Command};
use anyhow::Result;
use clap::Parser;

mod args;
mod commands;
mod logging;
mod wiring;

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init(args.log, &args.log_level);

    match args.command {
        Command::Run(opts) => commands::run::exec(opts),
        Command::ListRoles => commands::list_roles::exec(),
        Command::Validate { config } => commands::validate::exec(config),
    }
}
