//! Request and response types for text completion.

use scrivano_error::{BuilderError, BuilderErrorKind, ScrivanoResult};
use serde::{Deserialize, Serialize};

/// A single text completion request.
///
/// # Examples
///
/// ```
/// use scrivano_core::CompletionRequest;
///
/// # fn main() -> scrivano_error::ScrivanoResult<()> {
/// let request = CompletionRequest::builder()
///     .prompt("Write me a Youtube video title about volcanoes")
///     .temperature(0.9f32)
///     .max_tokens(800u32)
///     .build()?;
///
/// assert_eq!(*request.temperature(), 0.9);
/// assert!(request.model().is_none());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct CompletionRequest {
    /// The fully rendered prompt
    prompt: String,
    /// Sampling temperature (0.0 to 1.0)
    temperature: f32,
    /// Maximum number of tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Model identifier override
    #[builder(default)]
    model: Option<String>,
}

impl CompletionRequest {
    /// Creates a new completion request builder.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}

impl CompletionRequestBuilder {
    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns a builder error if a required field was never set or if the
    /// temperature falls outside [0.0, 1.0]. Backends never see an invalid
    /// temperature because no request carrying one can be constructed.
    pub fn build(&self) -> ScrivanoResult<CompletionRequest> {
        let request = self
            .build_internal()
            .map_err(|e| BuilderError::from(e.to_string()))?;
        if !(0.0..=1.0).contains(&request.temperature) {
            return Err(BuilderError::new(BuilderErrorKind::Validation(format!(
                "temperature {} outside [0.0, 1.0]",
                request.temperature
            )))
            .into());
        }
        Ok(request)
    }
}

/// Why generation stopped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum FinishReason {
    /// Model completed naturally.
    Stop,
    /// Hit the max_tokens limit.
    Length,
    /// Content was filtered.
    ContentFilter,
    /// Other/unknown reason.
    Other,
}

/// The text produced for one completion request.
///
/// # Examples
///
/// ```
/// use scrivano_core::{CompletionResponse, FinishReason};
///
/// let response = CompletionResponse::new("Fire Mountains Explained", FinishReason::Stop);
/// assert_eq!(response.text(), "Fire Mountains Explained");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct CompletionResponse {
    /// The generated text
    text: String,
    /// Why generation stopped
    finish_reason: FinishReason,
}

impl CompletionResponse {
    /// Creates a response from generated text and a finish reason.
    pub fn new(text: impl Into<String>, finish_reason: FinishReason) -> Self {
        Self {
            text: text.into(),
            finish_reason,
        }
    }
}
