//! OpenAI completions API data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Completions API request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct OpenAiCompletionRequest {
    /// Model identifier
    model: String,
    /// The prompt text
    prompt: String,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    temperature: f32,
}

impl OpenAiCompletionRequest {
    /// Creates a new builder for `OpenAiCompletionRequest`.
    pub fn builder() -> OpenAiCompletionRequestBuilder {
        OpenAiCompletionRequestBuilder::default()
    }
}

/// One generated choice in a completions response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct OpenAiChoice {
    /// The generated text
    #[serde(default)]
    text: String,
    /// Position of the choice in the response
    #[serde(default)]
    index: u32,
    /// Why generation stopped, as reported by the API
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAiUsage {
    /// Tokens consumed by the prompt
    #[serde(default)]
    prompt_tokens: u32,
    /// Tokens generated
    #[serde(default)]
    completion_tokens: u32,
    /// Total tokens billed
    #[serde(default)]
    total_tokens: u32,
}

/// Completions API response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct OpenAiCompletionResponse {
    /// Response identifier
    #[serde(default)]
    id: Option<String>,
    /// Model that served the request
    #[serde(default)]
    model: Option<String>,
    /// Generated choices
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    /// Token usage
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}
