//! Chain execution logic.
//!
//! This module provides the executor that runs a chain by rendering each
//! step's template from the accumulated bindings and calling the backend
//! adapters in declared order, passing earlier outputs to later steps.

use crate::{BackendKind, ChainSpec, StepSpec, TOPIC_KEY};
use chrono::Utc;
use scrivano_core::{BindingSet, CompletionRequest, FinishReason, MemoryLog};
use scrivano_error::{
    ChainError, ChainErrorKind, ScrivanoError, ScrivanoErrorKind, ScrivanoResult,
};
use scrivano_interface::{
    ChainExecution, ExecutionState, ResearchProvider, StepExecution, TextGenerator,
};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Executes chains by calling backend adapters in step order.
///
/// Each execution is an independent pipeline instance: a fresh binding
/// set seeded with the caller's topic, and a fresh memory log per step.
/// Steps run strictly sequentially because later templates may reference
/// any earlier output.
///
/// Generation failures abort the run and name the failing step. Research
/// failures degrade to an empty binding and the run continues, so a
/// missing reference never sinks a chain that can stand without it.
pub struct ChainExecutor<D: TextGenerator> {
    driver: D,
    research: Option<Box<dyn ResearchProvider>>,
}

impl<D: TextGenerator> ChainExecutor<D> {
    /// Create an executor with the given generation driver and no
    /// research provider.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            research: None,
        }
    }

    /// Add a research provider for chains with research steps.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use scrivano_chain::ChainExecutor;
    /// use scrivano_models::{OpenAiClient, WikipediaClient};
    ///
    /// let executor = ChainExecutor::new(openai)
    ///     .with_research(Box::new(wikipedia));
    /// ```
    pub fn with_research(mut self, provider: Box<dyn ResearchProvider>) -> Self {
        self.research = Some(provider);
        self
    }

    /// Get a reference to the underlying generation driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Whether a research provider is configured.
    pub fn has_research_provider(&self) -> bool {
        self.research.is_some()
    }

    /// Execute a chain, running all steps in declared order.
    ///
    /// The binding set starts as `{topic: topic}`. Each step renders its
    /// template against the accumulated bindings, calls its backend, and
    /// publishes its output under its own key for later steps. After the
    /// last step, assemblies join their parts into composite outputs.
    ///
    /// `creativity` is the temperature for every generation step without
    /// an explicit override.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The topic is empty or creativity falls outside [0.0, 1.0]
    /// - The chain has research steps but no provider is configured
    /// - Any generation backend call fails (`StepFailed` names the step;
    ///   subsequent steps are never run)
    #[tracing::instrument(
        skip(self, chain, topic),
        fields(
            chain = %chain.metadata().name(),
            steps = chain.steps().len(),
            topic_len = topic.len()
        )
    )]
    pub async fn execute(
        &self,
        chain: &ChainSpec,
        topic: &str,
        creativity: f32,
    ) -> ScrivanoResult<ChainExecution> {
        if topic.trim().is_empty() {
            return Err(ChainError::new(ChainErrorKind::EmptyTopic).into());
        }
        if !(0.0..=1.0).contains(&creativity) {
            return Err(ChainError::new(ChainErrorKind::CreativityOutOfRange(creativity)).into());
        }
        if chain.has_research() && self.research.is_none() {
            return Err(ChainError::new(ChainErrorKind::ResearchNotConfigured(format!(
                "chain '{}' contains a research step",
                chain.metadata().name()
            )))
            .into());
        }

        let id = Uuid::new_v4();
        let started_at = Utc::now();
        let mut state = ExecutionState::default();
        let mut bindings = BindingSet::new();
        bindings.insert(TOPIC_KEY, topic)?;

        let mut step_executions = Vec::with_capacity(chain.steps().len());
        let mut outputs = BTreeMap::new();

        for (index, step) in chain.steps().iter().enumerate() {
            state.advance(index);
            tracing::debug!(step = %step.key(), %state, "Starting step");

            // Validation guarantees every placeholder is bound by now.
            let rendered = step.template().render(&bindings)?;

            let execution = match step.backend() {
                BackendKind::Generate { .. } => {
                    self.run_generation(chain, step, index, rendered, creativity, &mut state)
                        .await?
                }
                BackendKind::Research { .. } => self.run_research(step, index, rendered).await?,
            };

            tracing::debug!(
                step = %step.key(),
                output_len = execution.output.len(),
                "Step completed"
            );
            bindings.insert(step.key().clone(), execution.output.clone())?;
            outputs.insert(step.key().clone(), execution.output.clone());
            step_executions.push(execution);
        }

        state.complete();

        let mut assembled = BTreeMap::new();
        for assembly in chain.assemblies() {
            let joined = assembly
                .parts()
                .iter()
                .map(|part| outputs.get(part).map(String::as_str).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(assembly.separator());
            assembled.insert(assembly.key().clone(), joined);
        }

        let finished_at = Utc::now();
        tracing::info!(
            id = %id,
            %state,
            steps = step_executions.len(),
            assemblies = assembled.len(),
            "Chain execution completed"
        );

        Ok(ChainExecution {
            id,
            chain_name: chain.metadata().name().clone(),
            topic: topic.to_string(),
            creativity,
            steps: step_executions,
            outputs,
            assembled,
            started_at,
            finished_at,
        })
    }

    /// Run one generation step: build the request with the effective
    /// parameters, call the driver, and record the exchange.
    async fn run_generation(
        &self,
        chain: &ChainSpec,
        step: &StepSpec,
        index: usize,
        rendered: String,
        creativity: f32,
        state: &mut ExecutionState,
    ) -> ScrivanoResult<StepExecution> {
        // Step overrides win over chain defaults; the caller's creativity
        // fills in wherever the step does not pin a temperature.
        let metadata = chain.metadata();
        let model = step.model().clone().or_else(|| metadata.model().clone());
        let temperature = (*step.temperature()).unwrap_or(creativity);
        let max_tokens = (*step.max_tokens()).or(*metadata.max_tokens());

        let request = CompletionRequest::builder()
            .prompt(rendered.clone())
            .temperature(temperature)
            .model(model.clone())
            .max_tokens(max_tokens)
            .build()?;

        let response = match self.driver.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                state.fail();
                tracing::error!(
                    step = %step.key(),
                    %state,
                    error = %e,
                    "Generation step failed, aborting chain"
                );
                return Err(step_failure(step.key(), index, e));
            }
        };
        if matches!(*response.finish_reason(), FinishReason::Length) {
            tracing::debug!(step = %step.key(), "Response truncated at the max_tokens limit");
        }

        let output = response.text().clone();
        let mut memory = MemoryLog::new();
        memory.append(rendered, output.clone());

        Ok(StepExecution {
            step_key: step.key().clone(),
            backend: self.driver.provider_name().to_string(),
            model,
            temperature: Some(temperature),
            max_tokens,
            output,
            memory,
            sequence_number: index,
        })
    }

    /// Run one research step. Lookup failures are downgraded to an empty
    /// result; missing references degrade the output, they do not sink
    /// the chain.
    async fn run_research(
        &self,
        step: &StepSpec,
        index: usize,
        rendered: String,
    ) -> ScrivanoResult<StepExecution> {
        let provider = self.research.as_ref().ok_or_else(|| {
            ChainError::new(ChainErrorKind::ResearchNotConfigured(format!(
                "step '{}' requires a research provider",
                step.key()
            )))
        })?;

        let output = match provider.lookup(&rendered).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    step = %step.key(),
                    error = %e,
                    "Research lookup failed, continuing with empty result"
                );
                String::new()
            }
        };

        let mut memory = MemoryLog::new();
        memory.append(rendered, output.clone());

        Ok(StepExecution {
            step_key: step.key().clone(),
            backend: provider.source_name().to_string(),
            model: None,
            temperature: None,
            max_tokens: None,
            output,
            memory,
            sequence_number: index,
        })
    }
}

/// Wrap a driver failure in `StepFailed` naming the step; other error
/// classes pass through unchanged.
fn step_failure(step: &str, index: usize, error: ScrivanoError) -> ScrivanoError {
    match error.into_kind() {
        ScrivanoErrorKind::Backend(source) => ChainError::new(ChainErrorKind::StepFailed {
            step: step.to_string(),
            index,
            source,
        })
        .into(),
        other => ScrivanoError::new(other),
    }
}
