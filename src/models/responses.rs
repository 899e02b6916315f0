//! Response DTOs for the props proxy API
//!
//! Defines the structure of outgoing HTTP response bodies other than the
//! player list itself (which serializes directly from `Vec<PlayerCard>`).

use serde::{Deserialize, Serialize};

/// Error body returned on every failure path.
///
/// The UI keys retry affordances off `code`, so codes are stable strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error category
    pub error: String,
    /// Human-readable description of what went wrong
    pub message: String,
    /// Stable machine-readable code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorBody {
    /// Creates a new ErrorBody with a code.
    pub fn new(error: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub cache_hits: u64,
    /// Number of cache misses
    pub cache_misses: u64,
    /// Number of cache evictions
    pub cache_evictions: u64,
    /// Current number of cached snapshots
    pub cached_entries: usize,
    /// Cache hit rate (hits / (hits + misses))
    pub cache_hit_rate: f64,
    /// Number of clients currently tracked by the rate limiter
    pub tracked_clients: usize,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics and limiter size.
    pub fn new(
        cache_hits: u64,
        cache_misses: u64,
        cache_evictions: u64,
        cached_entries: usize,
        tracked_clients: usize,
    ) -> Self {
        let total = cache_hits + cache_misses;
        let cache_hit_rate = if total > 0 {
            cache_hits as f64 / total as f64
        } else {
            0.0
        };
        Self {
            cache_hits,
            cache_misses,
            cache_evictions,
            cached_entries,
            cache_hit_rate,
            tracked_clients,
        }
    }
}
