//! API Handlers
//!
//! The request handler sequences limiter, cache, retry fetch, and cache write,
//! and maps every outcome to an HTTP response with status and headers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{ResponseCache, PLAYERS_CACHE_KEY};
use crate::config::Config;
use crate::limiter::{RateDecision, SlidingWindowLimiter};
use crate::models::{ErrorBody, HealthResponse, PlayerCard, StatsResponse};
use crate::upstream::{fetch_with_retry, PlayerSource, RetryPolicy};

// == Header Names ==
static X_CACHE_STATUS: HeaderName = HeaderName::from_static("x-cache-status");
static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Freshness advertised on successful responses, matching the cache TTL.
const CACHE_CONTROL_VALUE: &str = "public, s-maxage=300, stale-while-revalidate=600";

/// Application state shared across all handlers.
///
/// One cache and one limiter instance per process, constructed explicitly and
/// injected rather than living as hidden module globals.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe response cache
    pub cache: Arc<RwLock<ResponseCache>>,
    /// Thread-safe rate limiter
    pub limiter: Arc<RwLock<SlidingWindowLimiter>>,
    /// Upstream source of player lists
    pub source: Arc<dyn PlayerSource>,
    /// Retry budget and backoff shape
    pub retry: RetryPolicy,
}

impl AppState {
    /// Creates application state from configuration and an injected source.
    pub fn new(config: &Config, source: Arc<dyn PlayerSource>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(ResponseCache::new(
                config.cache_max_entries,
                config.cache_ttl_secs * 1000,
            ))),
            limiter: Arc::new(RwLock::new(SlidingWindowLimiter::new(
                config.rate_limit_max,
                config.rate_limit_window_secs * 1000,
            ))),
            source,
            retry: RetryPolicy::from_config(config),
        }
    }
}

/// Handler for GET /api/players
///
/// Flow: rate limiter (reject fast path) → cache (hit fast path) → retry
/// fetch → cache write. Every terminal response carries cache status and
/// rate-limit headers; CORS headers come from the layer around the router.
pub async fn players_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let client = client_key(&headers);

    let decision = state.limiter.write().await.check(&client);
    if !decision.allowed {
        debug!(client = %client, "rate limit exceeded");
        return rate_limited_response(&decision);
    }

    if let Some(players) = state.cache.write().await.get(PLAYERS_CACHE_KEY) {
        return players_response(players, "HIT", &decision);
    }

    match fetch_with_retry(state.source.as_ref(), &state.retry).await {
        Ok(players) => {
            state
                .cache
                .write()
                .await
                .set(PLAYERS_CACHE_KEY, players.clone(), None);
            players_response(players, "MISS", &decision)
        }
        Err(err) => {
            warn!(code = err.code(), error = %err, "players fetch failed");
            err.into_response()
        }
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    let tracked = state.limiter.read().await.tracked_clients();

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.total_entries,
        tracked,
    ))
}

// == Client Key Derivation ==
/// First hop of `x-forwarded-for`, else `x-real-ip`, else a constant.
///
/// Clients behind neither header share one bucket; that coarse fallback is a
/// deliberate policy, not something to infer around.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("default")
        .to_string()
}

// == Response Builders ==
/// 200 with the player list, cache status, and freshness headers.
fn players_response(
    players: Vec<PlayerCard>,
    cache_status: &'static str,
    decision: &RateDecision,
) -> Response {
    let mut response = (StatusCode::OK, Json(players)).into_response();
    let headers = response.headers_mut();
    headers.insert(X_CACHE_STATUS.clone(), HeaderValue::from_static(cache_status));
    headers.insert(
        X_RATELIMIT_REMAINING.clone(),
        HeaderValue::from(decision.remaining as u64),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_VALUE),
    );
    response
}

/// 429 for this service's own limiter, with the full rate-limit header set.
fn rate_limited_response(decision: &RateDecision) -> Response {
    let body = ErrorBody::new(
        "rate_limited",
        "Too many requests, please slow down",
        "RATE_LIMIT_EXCEEDED",
    );

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    let headers = response.headers_mut();
    headers.insert(header::RETRY_AFTER, HeaderValue::from_static("60"));
    headers.insert(
        X_RATELIMIT_LIMIT.clone(),
        HeaderValue::from(decision.limit as u64),
    );
    headers.insert(X_RATELIMIT_REMAINING.clone(), HeaderValue::from_static("0"));

    if let Some(reset) = DateTime::<Utc>::from_timestamp_millis(decision.reset_at_ms as i64) {
        if let Ok(value) = HeaderValue::from_str(&reset.to_rfc3339()) {
            headers.insert(X_RATELIMIT_RESET.clone(), value);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_key_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        headers.insert("x-real-ip", "192.0.2.1".parse().unwrap());

        assert_eq!(client_key(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_key_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "192.0.2.1".parse().unwrap());

        assert_eq!(client_key(&headers), "192.0.2.1");
    }

    #[test]
    fn test_client_key_constant_fallback() {
        assert_eq!(client_key(&HeaderMap::new()), "default");
    }

    #[test]
    fn test_client_key_ignores_empty_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "".parse().unwrap());
        headers.insert("x-real-ip", "192.0.2.1".parse().unwrap());

        assert_eq!(client_key(&headers), "192.0.2.1");
    }

    #[test]
    fn test_rate_limited_response_headers() {
        let decision = RateDecision {
            allowed: false,
            limit: 60,
            remaining: 0,
            reset_at_ms: 1_700_000_000_000,
        };

        let response = rate_limited_response(&decision);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let headers = response.headers();
        assert_eq!(headers[header::RETRY_AFTER], "60");
        assert_eq!(headers["x-ratelimit-limit"], "60");
        assert_eq!(headers["x-ratelimit-remaining"], "0");
        assert!(headers.contains_key("x-ratelimit-reset"));
    }
}
