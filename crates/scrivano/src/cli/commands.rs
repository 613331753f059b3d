//! CLI command definitions.

use clap::{Parser, Subcommand};

/// Scrivano - prompt chain orchestration for LLM content generators
#[derive(Parser, Debug)]
#[command(name = "scrivano")]
#[command(about = "Run prompt chains that turn a topic into generated content", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a chain against a topic
    Run {
        /// Builtin chain name or path to a chain TOML file
        #[arg(long)]
        chain: String,

        /// Topic the chain elaborates
        #[arg(long)]
        topic: String,

        /// Sampling temperature for steps without their own override
        #[arg(long, default_value_t = 0.9)]
        creativity: f32,

        /// Emit the full execution report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the builtin chains
    List,

    /// Show a chain definition without running it
    Show {
        /// Builtin chain name or path to a chain TOML file
        #[arg(long)]
        chain: String,
    },
}
