//! Response Cache Module
//!
//! Process-wide cache for transformed players snapshots. Entries expire after
//! their TTL and total size is bounded by evicting the least-accessed entry.

use std::collections::HashMap;

use crate::cache::{current_timestamp_ms, CacheEntry, CacheStats};
use crate::models::PlayerCard;

// == Response Cache ==
/// TTL cache with a bounded entry count.
///
/// The effective key space is tiny (one snapshot key per market), so the
/// least-accessed eviction scan stays linear.
#[derive(Debug)]
pub struct ResponseCache {
    /// Key to snapshot storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in milliseconds for entries without an explicit TTL
    default_ttl_ms: u64,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates a new ResponseCache.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `default_ttl_ms` - Default TTL in milliseconds
    pub fn new(max_entries: usize, default_ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl_ms,
        }
    }

    // == Get ==
    /// Returns the cached payload if present and fresh.
    ///
    /// An expired entry is removed on the spot and counted as a miss, so a
    /// snapshot is never served past `inserted_at + ttl`.
    pub fn get(&mut self, key: &str) -> Option<Vec<PlayerCard>> {
        self.get_at(key, current_timestamp_ms())
    }

    /// Lookup against an explicit clock, for deterministic tests.
    pub fn get_at(&mut self, key: &str, now_ms: u64) -> Option<Vec<PlayerCard>> {
        let fresh = match self.entries.get(key) {
            Some(entry) => !entry.is_expired_at(now_ms),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if !fresh {
            self.entries.remove(key);
            self.stats.set_total_entries(self.entries.len());
            self.stats.record_miss();
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.access_count += 1;
        let payload = entry.payload.clone();
        self.stats.record_hit();
        Some(payload)
    }

    // == Set ==
    /// Inserts or overwrites a snapshot, resetting its access count.
    ///
    /// When inserting a new key at capacity, the entry with the lowest access
    /// count is evicted first.
    ///
    /// # Arguments
    /// * `key` - The snapshot key
    /// * `payload` - The transformed player list
    /// * `ttl_ms` - Optional TTL in milliseconds (uses the default if None)
    pub fn set(&mut self, key: impl Into<String>, payload: Vec<PlayerCard>, ttl_ms: Option<u64>) {
        let key = key.into();
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.max_entries > 0 && self.entries.len() >= self.max_entries {
            if let Some(evict_key) = self.least_accessed_key() {
                self.entries.remove(&evict_key);
                self.stats.record_eviction();
            }
        }

        let ttl = ttl_ms.unwrap_or(self.default_ttl_ms);
        self.entries.insert(key, CacheEntry::new(payload, ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(current_timestamp_ms())
    }

    /// Cleanup against an explicit clock, for deterministic tests.
    pub fn cleanup_expired_at(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now_ms));
        let removed = before - self.entries.len();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key of the entry with the lowest access count (ties: oldest insertion).
    fn least_accessed_key(&self) -> Option<String> {
        self.entries
            .iter()
            .min_by_key(|(_, entry)| (entry.access_count, entry.inserted_at))
            .map(|(key, _)| key.clone())
    }
}
