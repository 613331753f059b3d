//! Backend adapters for the scrivano prompt chain library.
//!
//! This crate provides the two production backends the chain executor
//! drives: the OpenAI completions client (generation) and the Wikipedia
//! client (research), plus the layered configuration they load.
//!
//! # Example
//!
//! ```no_run
//! use scrivano_interface::TextGenerator;
//! use scrivano_core::CompletionRequest;
//! use scrivano_models::{BackendConfig, OpenAiClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BackendConfig::load()?;
//! let client = OpenAiClient::from_env(&config.openai)?;
//!
//! let request = CompletionRequest::builder()
//!     .prompt("Write me a Youtube video title about volcanoes")
//!     .temperature(0.9f32)
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod limiter;
mod openai;
mod retry;
mod wikipedia;

pub use config::{BackendConfig, OpenAiConfig, RetryConfig, WikipediaConfig};
pub use limiter::RequestLimiter;
pub use openai::{
    OpenAiChoice, OpenAiClient, OpenAiCompletionRequest, OpenAiCompletionRequestBuilder,
    OpenAiCompletionResponse, OpenAiUsage, from_openai_response, to_openai_request,
};
pub use retry::RetryPolicy;
pub use wikipedia::{
    WikipediaClient, WikipediaExtractQuery, WikipediaExtractResponse, WikipediaPage,
    WikipediaSearchHit, WikipediaSearchQuery, WikipediaSearchResponse,
};
