//! Retry Wrapper Module
//!
//! Bounded retries around the upstream fetch with exponential backoff and
//! jitter. Retry eligibility comes from the error taxonomy, never from
//! message text.

use std::time::Duration;

use tracing::warn;

use crate::config::Config;
use crate::error::{UpstreamError, UpstreamResult};
use crate::models::PlayerCard;
use crate::upstream::PlayerSource;

// == Retry Policy ==
/// Attempt budget and backoff shape for upstream fetches.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, initial call included
    pub max_attempts: u32,
    /// Base delay before the second attempt, in milliseconds
    pub base_delay_ms: u64,
    /// Backoff cap in milliseconds
    pub max_delay_ms: u64,
    /// Upper bound of random jitter added per delay, in milliseconds
    pub jitter_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 5000,
            jitter_ms: 1000,
        }
    }
}

impl RetryPolicy {
    /// Builds a policy from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay_ms: config.backoff_base_ms,
            max_delay_ms: config.backoff_max_ms,
            jitter_ms: config.backoff_jitter_ms,
        }
    }

    // == Backoff Delay ==
    /// Delay after the given zero-indexed failed attempt: base doubled per
    /// attempt, capped, plus random jitter to desynchronize concurrent
    /// retriers.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponential = self
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));
        let capped = exponential.min(self.max_delay_ms);
        let jitter = if self.jitter_ms > 0 {
            rand::random::<u64>() % (self.jitter_ms + 1)
        } else {
            0
        };
        Duration::from_millis(capped + jitter)
    }
}

// == Fetch With Retry ==
/// Calls the source until success or the attempt budget is exhausted.
///
/// Non-retryable errors (upstream rate limit, validation failure) propagate
/// immediately; retrying them would only repeat the same failure. After the
/// final attempt the last error is returned.
pub async fn fetch_with_retry(
    source: &dyn PlayerSource,
    policy: &RetryPolicy,
) -> UpstreamResult<Vec<PlayerCard>> {
    let attempts = policy.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 0..attempts {
        match source.fetch_players().await {
            Ok(players) => return Ok(players),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) => {
                warn!(
                    attempt = attempt + 1,
                    attempts,
                    error = %err,
                    "upstream fetch failed"
                );
                if attempt + 1 < attempts {
                    tokio::time::sleep(policy.delay_for_attempt(attempt)).await;
                }
                last_error = Some(err);
            }
        }
    }

    Err(last_error.unwrap_or(UpstreamError::Timeout))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Scripted source: fails with cloned errors until the script runs out,
    /// then succeeds with an empty list.
    struct ScriptedSource {
        errors: Vec<UpstreamError>,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        fn failing_with(errors: Vec<UpstreamError>) -> Self {
            Self {
                errors,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PlayerSource for ScriptedSource {
        async fn fetch_players(&self) -> UpstreamResult<Vec<PlayerCard>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            match self.errors.get(call) {
                Some(err) => Err(err.clone()),
                None => Ok(Vec::new()),
            }
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay_ms: 1,
            max_delay_ms: 2,
            jitter_ms: 0,
        }
    }

    fn service_error() -> UpstreamError {
        UpstreamError::Service {
            status: 500,
            body: "boom".to_string(),
        }
    }

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let source = ScriptedSource::failing_with(vec![]);
        let result = fetch_with_retry(&source, &fast_policy(3)).await;

        assert!(result.is_ok());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_retries_transient_failures() {
        let source = ScriptedSource::failing_with(vec![UpstreamError::Timeout, service_error()]);
        let result = fetch_with_retry(&source, &fast_policy(3)).await;

        assert!(result.is_ok());
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_permanent_failure_uses_exact_budget() {
        let source = ScriptedSource::failing_with(vec![
            service_error(),
            service_error(),
            service_error(),
            service_error(),
        ]);
        let result = fetch_with_retry(&source, &fast_policy(3)).await;

        assert!(matches!(result, Err(UpstreamError::Service { .. })));
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_rate_limited_is_not_retried() {
        let source = ScriptedSource::failing_with(vec![UpstreamError::RateLimited {
            retry_after: Some(30),
        }]);
        let result = fetch_with_retry(&source, &fast_policy(3)).await;

        assert!(matches!(result, Err(UpstreamError::RateLimited { .. })));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_validation_error_is_not_retried() {
        let source =
            ScriptedSource::failing_with(vec![UpstreamError::Validation("bad".to_string())]);
        let result = fetch_with_retry(&source, &fast_policy(3)).await;

        assert!(matches!(result, Err(UpstreamError::Validation(_))));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_returns_last_error() {
        let source = ScriptedSource::failing_with(vec![
            service_error(),
            UpstreamError::Timeout,
            UpstreamError::Unavailable { status: 503 },
        ]);
        let result = fetch_with_retry(&source, &fast_policy(3)).await;

        assert!(matches!(
            result,
            Err(UpstreamError::Unavailable { status: 503 })
        ));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay_ms: 1000,
            max_delay_ms: 5000,
            jitter_ms: 0,
        };

        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(4000));
        // 8000 capped to 5000
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(5000));
        assert_eq!(policy.delay_for_attempt(20), Duration::from_millis(5000));
    }

    #[test]
    fn test_backoff_jitter_bounds() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 5000,
            jitter_ms: 1000,
        };

        for _ in 0..50 {
            let delay = policy.delay_for_attempt(0).as_millis() as u64;
            assert!((1000..=2000).contains(&delay));
        }
    }
}
