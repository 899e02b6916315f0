//! Cleanup Task
//!
//! Background task that periodically removes expired cache entries and drops
//! idle rate-limiter clients, independent of request traffic.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;
use crate::limiter::SlidingWindowLimiter;

/// Spawns the periodic cleanup task.
///
/// The task sleeps for the configured interval between runs, then takes a
/// write lock on each structure in turn. The returned handle is aborted
/// during graceful shutdown so no interval outlives the process.
///
/// # Arguments
/// * `cache` - Shared response cache
/// * `limiter` - Shared rate limiter
/// * `interval_secs` - Seconds between cleanup runs
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<ResponseCache>>,
    limiter: Arc<RwLock<SlidingWindowLimiter>>,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let expired = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };
            let idle_clients = {
                let mut limiter_guard = limiter.write().await;
                limiter_guard.cleanup()
            };

            if expired > 0 || idle_clients > 0 {
                info!(expired, idle_clients, "cleanup pass finished");
            } else {
                debug!("cleanup pass found nothing to remove");
            }
        }
    })
}
