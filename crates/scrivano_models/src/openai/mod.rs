//! OpenAI completions backend.

mod client;
mod conversion;
mod dto;

pub use client::OpenAiClient;
pub use conversion::{from_openai_response, to_openai_request};
pub use dto::{
    OpenAiChoice, OpenAiCompletionRequest, OpenAiCompletionRequestBuilder,
    OpenAiCompletionResponse, OpenAiUsage,
};
