//! Cache Entry Module
//!
//! Defines the structure for individual cached snapshots with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::PlayerCard;

// == Cache Entry ==
/// A cached players snapshot with insertion metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached player list
    pub payload: Vec<PlayerCard>,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Time-to-live in milliseconds
    pub ttl_ms: u64,
    /// Number of reads served from this entry since insertion
    pub access_count: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry, inserted now, with the access count at zero.
    pub fn new(payload: Vec<PlayerCard>, ttl_ms: u64) -> Self {
        Self {
            payload,
            inserted_at: current_timestamp_ms(),
            ttl_ms,
            access_count: 0,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to `inserted_at + ttl_ms`, so a snapshot is
    /// never served past its TTL.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiry check against an explicit clock, for deterministic tests.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.inserted_at.saturating_add(self.ttl_ms)
    }

    // == Time To Live ==
    /// Returns remaining freshness in milliseconds (0 once expired).
    pub fn ttl_remaining_ms(&self) -> u64 {
        let expires_at = self.inserted_at.saturating_add(self.ttl_ms);
        expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
