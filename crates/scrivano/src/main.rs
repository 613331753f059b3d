//! Scrivano CLI binary.
//!
//! This binary provides command-line access to scrivano's functionality:
//! - Run a chain against a topic, with builtin or file-based chains
//! - List the builtin chain catalog
//! - Inspect a chain definition without running it

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, list_chains, run_chain, show_chain};

    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing, RUST_LOG winning over the verbosity flag
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    // Execute the requested command
    match cli.command {
        Commands::Run {
            chain,
            topic,
            creativity,
            json,
        } => {
            run_chain(&chain, &topic, creativity, json).await?;
        }

        Commands::List => {
            list_chains()?;
        }

        Commands::Show { chain } => {
            show_chain(&chain)?;
        }
    }

    Ok(())
}
