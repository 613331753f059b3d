//! Builder error types.

/// Specific error conditions for builder construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was never set
    #[display("Required field not set: {}", _0)]
    MissingField(String),
    /// The assembled value failed validation
    #[display("Builder validation failed: {}", _0)]
    Validation(String),
}

/// Error type for builder construction failures.
///
/// Generated builders report failures as strings; the `From<String>`
/// conversion folds those into [`BuilderErrorKind::Validation`].
///
/// # Examples
///
/// ```
/// use scrivano_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::new(BuilderErrorKind::MissingField("prompt".into()));
/// assert!(format!("{}", err).contains("prompt"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    /// The specific error condition
    pub kind: BuilderErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl BuilderError {
    /// Create a new BuilderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the specific error condition.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}

impl From<String> for BuilderError {
    #[track_caller]
    fn from(message: String) -> Self {
        Self::new(BuilderErrorKind::Validation(message))
    }
}

impl From<&str> for BuilderError {
    #[track_caller]
    fn from(message: &str) -> Self {
        Self::new(BuilderErrorKind::Validation(message.to_string()))
    }
}
