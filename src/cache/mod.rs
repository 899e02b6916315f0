//! Cache Module
//!
//! In-memory response cache with TTL expiration and access-count eviction.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::CacheStats;
pub use store::ResponseCache;

// == Public Constants ==
/// The single cache key under which the players snapshot is stored.
pub const PLAYERS_CACHE_KEY: &str = "players";
