//! Sliding Window Limiter
//!
//! Counts admitted requests per client within a trailing time window, avoiding
//! the burst-at-boundary artifacts of fixed buckets.

use std::collections::{HashMap, VecDeque};

use crate::cache::current_timestamp_ms;

// == Rate Decision ==
/// Outcome of one admission check, with everything the handler needs to emit
/// `X-RateLimit-*` headers.
#[derive(Debug, Clone, PartialEq)]
pub struct RateDecision {
    /// Whether the request was admitted
    pub allowed: bool,
    /// Configured maximum admitted requests per window
    pub limit: usize,
    /// Admissions left in the current window after this check
    pub remaining: usize,
    /// Unix milliseconds at which the window frees a slot again
    pub reset_at_ms: u64,
}

// == Sliding Window Limiter ==
/// Tracks admitted-request timestamps per client key.
///
/// Timestamps older than the window are pruned on every check, so a client
/// never has more than `max_requests` admissions in any trailing window.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    /// Admitted timestamps per client, oldest first
    windows: HashMap<String, VecDeque<u64>>,
    /// Maximum admitted requests within a window
    max_requests: usize,
    /// Window width in milliseconds
    window_ms: u64,
}

impl SlidingWindowLimiter {
    // == Constructor ==
    /// Creates a new limiter.
    ///
    /// # Arguments
    /// * `max_requests` - Maximum admitted requests per trailing window
    /// * `window_ms` - Window width in milliseconds
    pub fn new(max_requests: usize, window_ms: u64) -> Self {
        Self {
            windows: HashMap::new(),
            max_requests,
            window_ms,
        }
    }

    // == Check ==
    /// Admits or rejects a request for `client_key`.
    ///
    /// A rejected attempt is not recorded; only admitted requests count
    /// against the window.
    pub fn check(&mut self, client_key: &str) -> RateDecision {
        self.check_at(client_key, current_timestamp_ms())
    }

    /// Admission check against an explicit clock, for deterministic tests.
    pub fn check_at(&mut self, client_key: &str, now_ms: u64) -> RateDecision {
        let window = self.windows.entry(client_key.to_string()).or_default();

        // Prune admissions that have slid out of the window
        while let Some(&oldest) = window.front() {
            if now_ms.saturating_sub(oldest) >= self.window_ms {
                window.pop_front();
            } else {
                break;
            }
        }

        if window.len() >= self.max_requests {
            let reset_at_ms = window
                .front()
                .map(|&oldest| oldest + self.window_ms)
                .unwrap_or(now_ms);
            return RateDecision {
                allowed: false,
                limit: self.max_requests,
                remaining: 0,
                reset_at_ms,
            };
        }

        window.push_back(now_ms);
        let reset_at_ms = window
            .front()
            .map(|&oldest| oldest + self.window_ms)
            .unwrap_or(now_ms + self.window_ms);

        RateDecision {
            allowed: true,
            limit: self.max_requests,
            remaining: self.max_requests - window.len(),
            reset_at_ms,
        }
    }

    // == Cleanup ==
    /// Drops clients whose pruned window is empty, bounding memory growth
    /// from one-off clients. Returns the number of clients dropped.
    pub fn cleanup(&mut self) -> usize {
        self.cleanup_at(current_timestamp_ms())
    }

    /// Cleanup against an explicit clock, for deterministic tests.
    pub fn cleanup_at(&mut self, now_ms: u64) -> usize {
        let window_ms = self.window_ms;
        let before = self.windows.len();
        self.windows.retain(|_, window| {
            while let Some(&oldest) = window.front() {
                if now_ms.saturating_sub(oldest) >= window_ms {
                    window.pop_front();
                } else {
                    break;
                }
            }
            !window.is_empty()
        });
        before - self.windows.len()
    }

    // == Tracked Clients ==
    /// Number of client keys currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_up_to_limit_then_rejects() {
        let mut limiter = SlidingWindowLimiter::new(60, 60_000);
        let now = 1_000_000;

        for i in 0..60 {
            let decision = limiter.check_at("1.2.3.4", now + i);
            assert!(decision.allowed, "request {} should be admitted", i);
        }

        let decision = limiter.check_at("1.2.3.4", now + 100);
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
        assert_eq!(decision.limit, 60);
    }

    #[test]
    fn test_rejected_attempt_is_not_recorded() {
        let mut limiter = SlidingWindowLimiter::new(2, 60_000);
        let now = 1_000_000;

        assert!(limiter.check_at("c", now).allowed);
        assert!(limiter.check_at("c", now + 1).allowed);

        // Hammering while rejected must not extend the window
        for i in 0..10 {
            assert!(!limiter.check_at("c", now + 2 + i).allowed);
        }

        // Once the first admission slides out, one slot frees up
        assert!(limiter.check_at("c", now + 60_000).allowed);
    }

    #[test]
    fn test_window_slides() {
        let mut limiter = SlidingWindowLimiter::new(1, 60_000);
        let now = 1_000_000;

        assert!(limiter.check_at("c", now).allowed);
        assert!(!limiter.check_at("c", now + 59_999).allowed);
        assert!(limiter.check_at("c", now + 60_000).allowed);
    }

    #[test]
    fn test_clients_are_independent() {
        let mut limiter = SlidingWindowLimiter::new(1, 60_000);
        let now = 1_000_000;

        assert!(limiter.check_at("a", now).allowed);
        assert!(limiter.check_at("b", now).allowed);
        assert!(!limiter.check_at("a", now + 1).allowed);
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut limiter = SlidingWindowLimiter::new(3, 60_000);
        let now = 1_000_000;

        assert_eq!(limiter.check_at("c", now).remaining, 2);
        assert_eq!(limiter.check_at("c", now + 1).remaining, 1);
        assert_eq!(limiter.check_at("c", now + 2).remaining, 0);
    }

    #[test]
    fn test_reset_at_tracks_oldest_admission() {
        let mut limiter = SlidingWindowLimiter::new(2, 60_000);
        let now = 1_000_000;

        limiter.check_at("c", now);
        limiter.check_at("c", now + 10_000);

        let decision = limiter.check_at("c", now + 20_000);
        assert!(!decision.allowed);
        assert_eq!(decision.reset_at_ms, now + 60_000);
    }

    #[test]
    fn test_cleanup_drops_idle_clients() {
        let mut limiter = SlidingWindowLimiter::new(10, 60_000);
        let now = 1_000_000;

        limiter.check_at("idle", now);
        limiter.check_at("active", now + 50_000);
        assert_eq!(limiter.tracked_clients(), 2);

        let dropped = limiter.cleanup_at(now + 70_000);
        assert_eq!(dropped, 1);
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_never_exceeds_bound_under_mixed_timing() {
        let mut limiter = SlidingWindowLimiter::new(5, 1_000);
        let mut admitted_in_window = Vec::new();

        // Fire requests every 150ms and track admissions
        for i in 0..40u64 {
            let now = 1_000_000 + i * 150;
            if limiter.check_at("c", now).allowed {
                admitted_in_window.push(now);
            }
            admitted_in_window.retain(|&t| now - t < 1_000);
            assert!(
                admitted_in_window.len() <= 5,
                "admitted more than the bound within a window"
            );
        }
    }
}
