//! Test utilities for chain tests.
//!
//! Scripted backend mocks that record every call and replay queued
//! responses, so executor tests can assert call counts and rendered
//! prompts without touching the network.

use async_trait::async_trait;
use scrivano_core::{CompletionRequest, CompletionResponse, FinishReason};
use scrivano_error::{BackendError, BackendErrorKind, ScrivanoResult};
use scrivano_interface::{ResearchProvider, TextGenerator};
use std::sync::{Arc, Mutex};

/// A single scripted response (success or error).
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Success(String),
    Error(BackendErrorKind),
}

/// Mock text generator that replays a queue of scripted responses.
///
/// Records every request it receives; calls past the end of the queue
/// fail with a network error naming the overrun.
pub struct ScriptedGenerator {
    responses: Vec<ScriptedResponse>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedGenerator {
    /// Create a generator that replays `responses` in order.
    pub fn new(responses: Vec<ScriptedResponse>) -> Self {
        Self {
            responses,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shorthand for a generator that succeeds with the given texts in order.
    pub fn with_texts(texts: &[&str]) -> Self {
        Self::new(
            texts
                .iter()
                .map(|text| ScriptedResponse::Success(text.to_string()))
                .collect(),
        )
    }

    /// Number of times generate() was called.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &CompletionRequest) -> ScrivanoResult<CompletionResponse> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        match self.responses.get(index) {
            Some(ScriptedResponse::Success(text)) => {
                Ok(CompletionResponse::new(text.clone(), FinishReason::Stop))
            }
            Some(ScriptedResponse::Error(kind)) => {
                Err(BackendError::new(*kind, "scripted failure").into())
            }
            None => Err(BackendError::network(format!(
                "scripted responses exhausted (call {})",
                index + 1
            ))
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Mock research provider that answers every query with the same text
/// and records the queries it receives.
pub struct ScriptedResearch {
    result: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl ScriptedResearch {
    /// Create a provider that always returns `result`.
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the query log, for asserting after the provider is
    /// boxed into an executor.
    pub fn query_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.queries)
    }
}

#[async_trait]
impl ResearchProvider for ScriptedResearch {
    async fn lookup(&self, query: &str) -> ScrivanoResult<String> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.result.clone())
    }

    fn source_name(&self) -> &'static str {
        "scripted-research"
    }
}

/// Mock research provider that fails every lookup with the given kind.
pub struct FailingResearch {
    kind: BackendErrorKind,
    call_count: Arc<Mutex<usize>>,
}

impl FailingResearch {
    /// Create a provider that always fails with `kind`.
    pub fn new(kind: BackendErrorKind) -> Self {
        Self {
            kind,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Handle to the call counter, for asserting after the provider is
    /// boxed into an executor.
    pub fn counter(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait]
impl ResearchProvider for FailingResearch {
    async fn lookup(&self, _query: &str) -> ScrivanoResult<String> {
        *self.call_count.lock().unwrap() += 1;
        Err(BackendError::new(self.kind, "scripted research failure").into())
    }

    fn source_name(&self) -> &'static str {
        "failing-research"
    }
}
