//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

/// Default upstream endpoint for player props.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.squads.game/bet/public-props";

/// Default market selected from the upstream endpoint.
pub const DEFAULT_MARKET_TYPE: &str = "player_shots_on_target";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Upstream props endpoint URL
    pub upstream_url: String,
    /// Market type query parameter sent upstream
    pub market_type: String,
    /// Upstream request timeout in seconds
    pub fetch_timeout_secs: u64,
    /// Maximum fetch attempts per request (initial attempt included)
    pub max_attempts: u32,
    /// Base backoff delay between attempts in milliseconds
    pub backoff_base_ms: u64,
    /// Backoff delay cap in milliseconds
    pub backoff_max_ms: u64,
    /// Upper bound of random jitter added to each backoff delay, in milliseconds
    pub backoff_jitter_ms: u64,
    /// Cache TTL in seconds for the players snapshot
    pub cache_ttl_secs: u64,
    /// Maximum number of entries the response cache can hold
    pub cache_max_entries: usize,
    /// Maximum admitted requests per client within the rate-limit window
    pub rate_limit_max: usize,
    /// Rate-limit window width in seconds
    pub rate_limit_window_secs: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval_secs: u64,
    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_URL` - Upstream props endpoint
    /// - `MARKET_TYPE` - Market type query parameter
    /// - `FETCH_TIMEOUT_SECS` - Upstream timeout in seconds (default: 10)
    /// - `MAX_ATTEMPTS` - Fetch attempts per request (default: 3)
    /// - `BACKOFF_BASE_MS` / `BACKOFF_MAX_MS` / `BACKOFF_JITTER_MS` - Retry delays
    /// - `CACHE_TTL_SECS` - Players snapshot TTL (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Cache capacity (default: 100)
    /// - `RATE_LIMIT_MAX` - Admitted requests per window (default: 60)
    /// - `RATE_LIMIT_WINDOW_SECS` - Window width (default: 60)
    /// - `CLEANUP_INTERVAL_SECS` - Cleanup frequency (default: 300)
    /// - `ALLOWED_ORIGINS` - Comma-separated CORS origin allow-list
    pub fn from_env() -> Self {
        Self {
            server_port: env_parse("SERVER_PORT", 3000),
            upstream_url: env::var("UPSTREAM_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
            market_type: env::var("MARKET_TYPE")
                .unwrap_or_else(|_| DEFAULT_MARKET_TYPE.to_string()),
            fetch_timeout_secs: env_parse("FETCH_TIMEOUT_SECS", 10),
            max_attempts: env_parse("MAX_ATTEMPTS", 3),
            backoff_base_ms: env_parse("BACKOFF_BASE_MS", 1000),
            backoff_max_ms: env_parse("BACKOFF_MAX_MS", 5000),
            backoff_jitter_ms: env_parse("BACKOFF_JITTER_MS", 1000),
            cache_ttl_secs: env_parse("CACHE_TTL_SECS", 300),
            cache_max_entries: env_parse("CACHE_MAX_ENTRIES", 100),
            rate_limit_max: env_parse("RATE_LIMIT_MAX", 60),
            rate_limit_window_secs: env_parse("RATE_LIMIT_WINDOW_SECS", 60),
            cleanup_interval_secs: env_parse("CLEANUP_INTERVAL_SECS", 300),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_else(|_| default_origins()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            market_type: DEFAULT_MARKET_TYPE.to_string(),
            fetch_timeout_secs: 10,
            max_attempts: 3,
            backoff_base_ms: 1000,
            backoff_max_ms: 5000,
            backoff_jitter_ms: 1000,
            cache_ttl_secs: 300,
            cache_max_entries: 100,
            rate_limit_max: 60,
            rate_limit_window_secs: 60,
            cleanup_interval_secs: 300,
            allowed_origins: default_origins(),
        }
    }
}

/// Production and development origins accepted by the CORS layer.
fn default_origins() -> Vec<String> {
    vec![
        "https://squads.game".to_string(),
        "https://www.squads.game".to_string(),
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

/// Splits a comma-separated origin list, trimming and dropping empties.
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
