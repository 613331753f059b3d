//! Retry schedules for transient backend failures.

use crate::RetryConfig;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};

/// Bounded, jittered exponential backoff schedule.
///
/// Only transient failure kinds are retried; which kinds count as
/// transient is decided by the caller (see
/// [`BackendErrorKind::is_transient`](scrivano_error::BackendErrorKind::is_transient)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    /// Creates a policy retrying `max_attempts` times after the first
    /// failure, backing off from `base_delay_ms` up to `max_delay_ms`.
    pub fn new(max_attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
            max_delay_ms,
        }
    }

    /// Retry attempts after the first failure.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The backoff delay iterator for one request.
    pub(crate) fn strategy(&self) -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(self.base_delay_ms)
            .factor(2)
            .max_delay(Duration::from_millis(self.max_delay_ms))
            .map(jitter)
            .take(self.max_attempts as usize)
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            config.base_delay_ms,
            config.max_delay_ms,
        )
    }
}
