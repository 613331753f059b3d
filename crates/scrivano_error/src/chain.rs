//! Chain error types.

use crate::BackendError;

/// Specific error conditions for chain definition and execution.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum ChainErrorKind {
    /// Failed to read chain definition file
    #[display("Failed to read chain file: {}", _0)]
    FileRead(String),
    /// Failed to parse TOML content
    #[display("Failed to parse TOML: {}", _0)]
    TomlParse(String),
    /// Chain declares no steps
    #[display("Chain must declare at least one step")]
    EmptyChain,
    /// Two steps share an output key
    #[display("Duplicate step key '{}'", _0)]
    DuplicateStepKey(String),
    /// A step claims a key reserved for caller input
    #[display("Step key '{}' is reserved for caller input", _0)]
    ReservedKey(String),
    /// A template references a key no earlier step or input provides
    #[display("Step '{}' references '{{{}}}', which no earlier step or input provides", step, placeholder)]
    UnboundPlaceholder {
        /// Step whose template is at fault
        step: String,
        /// The unsatisfiable placeholder name
        placeholder: String,
    },
    /// A step template is empty or whitespace-only
    #[display("Step '{}' has an empty template", _0)]
    EmptyTemplate(String),
    /// A template failed to parse
    #[display("Invalid template: {}", _0)]
    InvalidPlaceholder(String),
    /// An assembly names a part that is not a step key
    #[display("Assembly '{}' references unknown step '{}'", assembly, part)]
    UnknownAssemblyPart {
        /// Assembly whose part list is at fault
        assembly: String,
        /// The unknown part
        part: String,
    },
    /// An assembly key collides with a step key or another assembly
    #[display("Assembly key '{}' collides with an existing key", _0)]
    DuplicateAssemblyKey(String),
    /// An assembly declares no parts
    #[display("Assembly '{}' has no parts", _0)]
    EmptyAssembly(String),
    /// Requested chain is not in the builtin catalog
    #[display("Unknown chain '{}', expected one of: {}", name, known.join(", "))]
    UnknownChain {
        /// The requested name
        name: String,
        /// Names the catalog does provide
        known: Vec<String>,
    },
    /// Template rendering found placeholders with no bound value
    #[display("No binding for placeholder(s): {}", placeholders.join(", "))]
    MissingBinding {
        /// Placeholder names with no binding, in template order
        placeholders: Vec<String>,
    },
    /// Caller supplied an empty or whitespace-only topic
    #[display("Topic cannot be empty")]
    EmptyTopic,
    /// Caller supplied a creativity value outside [0.0, 1.0]
    #[display("Creativity {} is outside [0.0, 1.0]", _0)]
    CreativityOutOfRange(f32),
    /// A step tried to publish under a key that is already bound
    #[display("Binding '{}' already exists", _0)]
    DuplicateBinding(String),
    /// Chain contains a research step but no research provider is configured
    #[display("Research provider not configured: {}", _0)]
    ResearchNotConfigured(String),
    /// A generation step failed and aborted the execution
    #[display("Step '{}' (index {}) failed: {}", step, index, source)]
    StepFailed {
        /// Output key of the failed step
        step: String,
        /// Zero-based position of the failed step
        index: usize,
        /// The backend failure that caused the abort
        source: BackendError,
    },
}

/// Error type for chain operations.
///
/// # Examples
///
/// ```
/// use scrivano_error::{ChainError, ChainErrorKind};
///
/// let err = ChainError::new(ChainErrorKind::EmptyChain);
/// assert!(format!("{}", err).contains("at least one step"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Chain Error: {} at line {} in {}", kind, line, file)]
pub struct ChainError {
    /// The specific error condition
    pub kind: ChainErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ChainError {
    /// Create a new ChainError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ChainErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the specific error condition.
    pub fn kind(&self) -> &ChainErrorKind {
        &self.kind
    }
}
