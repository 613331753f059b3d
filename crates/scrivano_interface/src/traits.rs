//! Trait definitions for generation and research backends.

use async_trait::async_trait;
use scrivano_core::{CompletionRequest, CompletionResponse};
use scrivano_error::ScrivanoResult;

/// Core trait that all text generation backends implement.
///
/// This is the minimal surface the chain executor needs: one rendered
/// prompt in, one completion out. Implementations are stateless per call,
/// so independent executions may share a single driver.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce a completion for a fully rendered prompt.
    async fn generate(&self, req: &CompletionRequest) -> ScrivanoResult<CompletionResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used when a request carries no override.
    fn model_name(&self) -> &str;
}

/// Trait for reference lookup backends that feed research steps.
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    /// Look up reference material for a query.
    ///
    /// An empty string is a valid result and means "nothing found".
    async fn lookup(&self, query: &str) -> ScrivanoResult<String>;

    /// Source name (e.g., "wikipedia").
    fn source_name(&self) -> &'static str;
}
