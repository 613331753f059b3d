//! Chain execution records and progress states.
//!
//! These types are the shared vocabulary between the executor (in
//! scrivano_chain) and anything that displays or persists a run.

use chrono::{DateTime, Utc};
use scrivano_core::MemoryLog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Execution record for a single step in a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepExecution {
    /// Output key of the step.
    pub step_key: String,

    /// Name of the backend provider that served the step, as reported by
    /// `provider_name` or `source_name`.
    pub backend: String,

    /// The model the step ran with, if any was named.
    pub model: Option<String>,

    /// The sampling temperature the step ran with (generation steps only).
    pub temperature: Option<f32>,

    /// The max_tokens limit the step ran with, if any.
    pub max_tokens: Option<u32>,

    /// The step's published output.
    pub output: String,

    /// The step's private transcript.
    pub memory: MemoryLog,

    /// Position in the execution sequence (0-indexed).
    pub sequence_number: usize,
}

/// Complete execution record for one chain run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainExecution {
    /// Unique identifier for this run.
    pub id: Uuid,

    /// Name of the chain that was executed.
    pub chain_name: String,

    /// The caller's topic input.
    pub topic: String,

    /// The caller's creativity setting.
    pub creativity: f32,

    /// Ordered step records, one per declared step.
    pub steps: Vec<StepExecution>,

    /// Step outputs keyed by step key.
    pub outputs: BTreeMap<String, String>,

    /// Composite outputs keyed by assembly key.
    pub assembled: BTreeMap<String, String>,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

impl ChainExecution {
    /// Look up the transcript of a step by its output key.
    pub fn transcript(&self, key: &str) -> Option<&MemoryLog> {
        self.steps
            .iter()
            .find(|step| step.step_key == key)
            .map(|step| &step.memory)
    }
}

/// Progress of a chain execution.
///
/// Transitions move strictly forward: `NotStarted` to `Running { step: 0 }`,
/// then step by step to either `Completed` or `Failed`. Terminal states
/// never transition again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum ExecutionState {
    /// No step has begun.
    #[default]
    #[display("not started")]
    NotStarted,
    /// The step at `step` is in flight.
    #[display("running step {}", step)]
    Running {
        /// Zero-based index of the step in flight
        step: usize,
    },
    /// Every step finished and outputs were published.
    #[display("completed")]
    Completed,
    /// The step at `step` failed and aborted the run.
    #[display("failed at step {}", step)]
    Failed {
        /// Zero-based index of the failed step
        step: usize,
    },
}

impl ExecutionState {
    /// Whether the state is `Completed` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed { .. })
    }

    /// Move to `Running { step: index }`.
    ///
    /// Legal from `NotStarted` when `index` is 0, and from `Running { step }`
    /// when `index` is `step + 1`. Returns whether the transition was taken.
    pub fn advance(&mut self, index: usize) -> bool {
        let legal = match self {
            Self::NotStarted => index == 0,
            Self::Running { step } => index == *step + 1,
            Self::Completed | Self::Failed { .. } => false,
        };
        if legal {
            *self = Self::Running { step: index };
        }
        legal
    }

    /// Move from `Running` to `Completed`. Returns whether the transition
    /// was taken.
    pub fn complete(&mut self) -> bool {
        match self {
            Self::Running { .. } => {
                *self = Self::Completed;
                true
            }
            _ => false,
        }
    }

    /// Move from `Running { step }` to `Failed { step }`. Returns whether
    /// the transition was taken.
    pub fn fail(&mut self) -> bool {
        match self {
            Self::Running { step } => {
                *self = Self::Failed { step: *step };
                true
            }
            _ => false,
        }
    }
}
