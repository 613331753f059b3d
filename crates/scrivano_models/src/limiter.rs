//! Request throttling for shared backends.
//!
//! Independent executions may share one adapter, so the adapter enforces
//! the requests-per-minute quota itself using the governor crate's GCRA
//! algorithm (lock-free, no token-bucket mutex).

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

// Type alias for our direct rate limiter
type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Requests-per-minute limiter shared by clones of an adapter.
///
/// A limiter built from `None` (or zero) never waits.
#[derive(Clone, Default)]
pub struct RequestLimiter {
    rpm: Option<Arc<DirectRateLimiter>>,
}

impl RequestLimiter {
    /// Creates a limiter enforcing `rpm` requests per minute.
    pub fn new(rpm: Option<u32>) -> Self {
        let rpm = rpm.and_then(|rpm| {
            NonZeroU32::new(rpm).map(|n| {
                let quota = Quota::per_minute(n);
                Arc::new(GovernorRateLimiter::direct(quota))
            })
        });
        Self { rpm }
    }

    /// Whether a quota is being enforced.
    pub fn is_enforcing(&self) -> bool {
        self.rpm.is_some()
    }

    /// Wait until the next request is allowed.
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.rpm {
            limiter.until_ready().await;
        }
    }
}

impl std::fmt::Debug for RequestLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLimiter")
            .field("enforcing", &self.is_enforcing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unthrottled_limiter_never_enforces() {
        assert!(!RequestLimiter::new(None).is_enforcing());
        assert!(!RequestLimiter::new(Some(0)).is_enforcing());
        assert!(RequestLimiter::new(Some(60)).is_enforcing());
    }

    #[tokio::test]
    async fn test_unthrottled_acquire_returns_immediately() {
        let limiter = RequestLimiter::new(None);
        limiter.acquire().await;
    }

    #[tokio::test]
    async fn test_first_acquire_within_quota_does_not_block() {
        let limiter = RequestLimiter::new(Some(60));
        limiter.acquire().await;
    }
}
