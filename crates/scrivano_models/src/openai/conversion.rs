//! Type conversions between scrivano and OpenAI wire types.

use super::dto::{OpenAiCompletionRequest, OpenAiCompletionResponse};
use scrivano_core::{CompletionRequest, CompletionResponse, FinishReason};
use scrivano_error::{BackendError, BuilderError, ScrivanoResult};

/// Converts a completion request to the OpenAI wire format.
///
/// `default_model` and `default_max_tokens` fill in whatever the request
/// does not override.
pub fn to_openai_request(
    request: &CompletionRequest,
    default_model: &str,
    default_max_tokens: u32,
) -> ScrivanoResult<OpenAiCompletionRequest> {
    let model = request
        .model()
        .clone()
        .unwrap_or_else(|| default_model.to_string());
    let max_tokens = request.max_tokens().unwrap_or(default_max_tokens);

    OpenAiCompletionRequest::builder()
        .model(model)
        .prompt(request.prompt().clone())
        .max_tokens(max_tokens)
        .temperature(*request.temperature())
        .build()
        .map_err(|e| {
            BuilderError::from(format!("Failed to build completion request: {e}")).into()
        })
}

/// Converts an OpenAI response to a completion response.
///
/// # Errors
///
/// Returns a `Network` error when the response carries no choices; a
/// usable reply always has at least one.
pub fn from_openai_response(
    response: &OpenAiCompletionResponse,
) -> ScrivanoResult<CompletionResponse> {
    let choice = response
        .choices()
        .first()
        .ok_or_else(|| BackendError::network("completion response contained no choices"))?;

    let finish_reason = match choice.finish_reason().as_deref() {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        _ => FinishReason::Other,
    };

    Ok(CompletionResponse::new(choice.text().clone(), finish_reason))
}
