//! Backend error types.

/// Failure classification shared by every backend adapter.
///
/// The four kinds are the complete vocabulary: adapters fold every concrete
/// failure (transport, HTTP status, unusable body) into one of these and put
/// the specifics in [`BackendError::detail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum BackendErrorKind {
    /// Credential missing, rejected, or lacking permission
    #[display("auth")]
    Auth,
    /// Rate limit or usage quota exhausted
    #[display("quota")]
    Quota,
    /// Transport failure or a response the adapter could not use
    #[display("network")]
    Network,
    /// The request exceeded the adapter's deadline
    #[display("timeout")]
    Timeout,
}

impl BackendErrorKind {
    /// Whether a retry could plausibly succeed without operator action.
    ///
    /// `Auth` failures are permanent until the credential changes; the
    /// other kinds are transient.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Auth)
    }
}

/// Backend error with failure classification and source location.
///
/// # Examples
///
/// ```
/// use scrivano_error::{BackendError, BackendErrorKind};
///
/// let err = BackendError::new(BackendErrorKind::Timeout, "no response after 60s");
/// assert_eq!(*err.kind(), BackendErrorKind::Timeout);
/// assert!(format!("{}", err).contains("timeout"));
/// ```
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("Backend Error ({}): {} at line {} in {}", kind, detail, line, file)]
pub struct BackendError {
    /// The failure classification
    pub kind: BackendErrorKind,
    /// Human-readable detail
    pub detail: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError with the given kind and detail at the current location.
    #[track_caller]
    pub fn new(kind: BackendErrorKind, detail: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            detail: detail.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the failure classification.
    pub fn kind(&self) -> &BackendErrorKind {
        &self.kind
    }

    /// Create an `Auth` error at the current location.
    #[track_caller]
    pub fn auth(detail: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Auth, detail)
    }

    /// Create a `Quota` error at the current location.
    #[track_caller]
    pub fn quota(detail: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Quota, detail)
    }

    /// Create a `Network` error at the current location.
    #[track_caller]
    pub fn network(detail: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Network, detail)
    }

    /// Create a `Timeout` error at the current location.
    #[track_caller]
    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Timeout, detail)
    }
}
