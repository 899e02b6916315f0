//! Property-based tests for the response cache
//!
//! Verifies the freshness and bounded-size invariants hold under arbitrary
//! sequences of inserts, reads, and clock advances.

use proptest::prelude::*;

use crate::cache::{current_timestamp_ms, ResponseCache};
use crate::models::PlayerCard;

fn card(id: u32) -> PlayerCard {
    PlayerCard {
        id: format!("p-{}", id),
        name: format!("Player {}", id),
        team: "City".to_string(),
        position: "Forward".to_string(),
        opponent: "United".to_string(),
        date: "Sat, Mar 8, 7:30 PM".to_string(),
        stat: "Shots on Target".to_string(),
        value: "1.5".to_string(),
        avatar: String::new(),
        is_live: None,
        league: None,
        number: None,
    }
}

proptest! {
    /// A fresh entry is always served; an elapsed entry never is.
    #[test]
    fn prop_never_served_past_ttl(ttl_ms in 1u64..600_000, elapsed in 0u64..1_200_000) {
        let mut cache = ResponseCache::new(10, 300_000);
        cache.set("players", vec![card(1)], Some(ttl_ms));
        let now = current_timestamp_ms();

        let result = cache.get_at("players", now + elapsed);
        if elapsed >= ttl_ms {
            prop_assert!(result.is_none());
        } else if elapsed + 1_000 < ttl_ms {
            // Leave a margin for the clock read between set() and here
            prop_assert!(result.is_some());
        }
    }

    /// The entry count never exceeds the configured capacity.
    #[test]
    fn prop_size_stays_bounded(max in 1usize..20, inserts in 1usize..60) {
        let mut cache = ResponseCache::new(max, 300_000);
        for i in 0..inserts {
            cache.set(format!("key-{}", i), vec![card(i as u32)], None);
            prop_assert!(cache.len() <= max);
        }
    }

    /// Cleanup removes exactly the expired entries.
    #[test]
    fn prop_cleanup_keeps_fresh_entries(short in 1u64..10_000, long in 100_000u64..600_000) {
        let mut cache = ResponseCache::new(10, 300_000);
        cache.set("short", vec![card(1)], Some(short));
        cache.set("long", vec![card(2)], Some(long));
        let now = current_timestamp_ms();

        let removed = cache.cleanup_expired_at(now + 50_000);
        prop_assert_eq!(removed, 1);
        prop_assert_eq!(cache.len(), 1);
    }
}
