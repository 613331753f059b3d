//! Chain definition and execution engine for Scrivano.
//!
//! This crate provides the prompt chain orchestrator: TOML-defined
//! chains of generation and research steps, validated at construction
//! and executed sequentially against pluggable backend adapters.
//!
//! # Features
//!
//! - **TOML-based chains**: Define multi-step pipelines as data
//! - **Construction-time validation**: A `ChainSpec` in hand is runnable
//! - **Per-step memory logs**: Every step keeps its own transcript
//! - **Output assembly**: Join step outputs into composite results
//! - **Builtin catalog**: `script`, `article`, and `tutorial` ship embedded
//!
//! # Example
//!
//! ```rust,ignore
//! use scrivano_chain::{catalog, ChainExecutor};
//! use scrivano_models::{BackendConfig, OpenAiClient, WikipediaClient};
//!
//! # async fn example() -> scrivano_error::ScrivanoResult<()> {
//! let config = BackendConfig::load()?;
//! let openai = OpenAiClient::from_env(&config.openai)?;
//! let wikipedia = WikipediaClient::new(&config.wikipedia)?;
//!
//! let chain = catalog::builtin("article")?;
//! let executor = ChainExecutor::new(openai).with_research(Box::new(wikipedia));
//!
//! let execution = executor.execute(&chain, "black holes", 0.9).await?;
//! println!("{}", execution.outputs["title"]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
mod executor;
mod spec;
mod toml_parser;

pub use executor::ChainExecutor;
pub use spec::{
    AssemblySpec, BackendKind, ChainMetadata, ChainSpec, DEFAULT_RESEARCH_QUERY, StepSpec,
    TOPIC_KEY,
};
