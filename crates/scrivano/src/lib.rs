//! Scrivano - Prompt Chain Orchestration
//!
//! Scrivano turns a single topic string into generated content by running
//! a chain of templated LLM calls, where each step's output becomes a
//! binding available to every later step. Chains are data: TOML files
//! declaring steps, optional research lookups, and assemblies that join
//! step outputs into composite documents.
//!
//! # Features
//!
//! - **Chains as data**: steps, research lookups, and assemblies declared
//!   in TOML, validated at load time
//! - **Builtin catalog**: `script`, `article`, and `tutorial` generators
//!   embedded in the binary
//! - **Pluggable backends**: a `TextGenerator` trait for completion APIs
//!   and a `ResearchProvider` trait for reference lookups
//! - **Execution reports**: per-step transcripts, outputs keyed by step,
//!   and assembled composites, serializable as JSON
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scrivano::{catalog, BackendConfig, ChainExecutor, OpenAiClient, WikipediaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BackendConfig::load()?;
//!     let client = OpenAiClient::from_env(&config.openai)?;
//!     let wikipedia = WikipediaClient::new(&config.wikipedia)?;
//!
//!     let chain = catalog::builtin("article")?;
//!     let executor = ChainExecutor::new(client).with_research(Box::new(wikipedia));
//!
//!     let execution = executor.execute(&chain, "black holes", 0.9).await?;
//!     println!("{}", execution.outputs["article1"]);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Scrivano is organized as a workspace with focused crates:
//!
//! - `scrivano_error` - Error types
//! - `scrivano_core` - Core data types (PromptTemplate, BindingSet, etc.)
//! - `scrivano_interface` - TextGenerator/ResearchProvider traits and
//!   execution reports
//! - `scrivano_models` - OpenAI and Wikipedia adapters plus configuration
//! - `scrivano_chain` - Chain definitions, the builtin catalog, and the
//!   executor
//!
//! This crate (`scrivano`) re-exports everything for convenience and
//! ships the `scrivano` CLI binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use scrivano_core::*;
pub use scrivano_error::*;
pub use scrivano_interface::*;

pub use scrivano_chain::{
    AssemblySpec, BackendKind, ChainExecutor, ChainMetadata, ChainSpec, DEFAULT_RESEARCH_QUERY,
    StepSpec, TOPIC_KEY, catalog,
};

pub use scrivano_models::{
    BackendConfig, OpenAiClient, OpenAiConfig, RetryConfig, RetryPolicy, WikipediaClient,
    WikipediaConfig,
};
