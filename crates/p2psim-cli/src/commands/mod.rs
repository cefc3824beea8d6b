//! # p2psim-cli::commands
//!
//! One module per subcommand.

pub mod list_roles;
pub mod run;
pub mod validate;
