//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the
//! scrivano binary.

mod commands;
mod run;
mod show;

pub use commands::{Cli, Commands};
pub use run::run_chain;
pub use show::{list_chains, show_chain};
