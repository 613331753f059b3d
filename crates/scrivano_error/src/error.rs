//! Top-level error wrapper types.

use crate::{BackendError, BuilderError, ChainError, ConfigError, JsonError};

/// The foundation error enum for the scrivano workspace.
///
/// # Examples
///
/// ```
/// use scrivano_error::{ScrivanoError, ConfigError};
///
/// let cfg_err = ConfigError::new("no such profile");
/// let err: ScrivanoError = cfg_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ScrivanoErrorKind {
    /// Backend adapter error
    #[from(BackendError)]
    Backend(BackendError),
    /// Chain definition or execution error
    #[from(ChainError)]
    Chain(ChainError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// JSON serialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Scrivano error with kind discrimination.
///
/// # Examples
///
/// ```
/// use scrivano_error::{ScrivanoResult, ChainError, ChainErrorKind};
///
/// fn might_fail() -> ScrivanoResult<()> {
///     Err(ChainError::new(ChainErrorKind::EmptyTopic))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Scrivano Error: {}", _0)]
pub struct ScrivanoError(Box<ScrivanoErrorKind>);

impl ScrivanoError {
    /// Create a new error from a kind.
    pub fn new(kind: ScrivanoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScrivanoErrorKind {
        &self.0
    }

    /// Consume the error, returning the kind.
    pub fn into_kind(self) -> ScrivanoErrorKind {
        *self.0
    }
}

// Generic From implementation for any type that converts to ScrivanoErrorKind
impl<T> From<T> for ScrivanoError
where
    T: Into<ScrivanoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for scrivano operations.
///
/// # Examples
///
/// ```
/// use scrivano_error::{ScrivanoResult, BackendError};
///
/// fn fetch_completion() -> ScrivanoResult<String> {
///     Err(BackendError::network("connection reset"))?
/// }
/// ```
pub type ScrivanoResult<T> = std::result::Result<T, ScrivanoError>;
