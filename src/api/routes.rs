//! API Routes
//!
//! Configures the Axum router, with CORS computed from the configured origin
//! allow-list. The CORS layer answers `OPTIONS` preflights before routing, so
//! preflights are never rate-limited or cached.

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{health_handler, players_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/players` - Players snapshot (limiter → cache → upstream)
/// - `GET /health` - Health check endpoint
/// - `GET /stats` - Cache and limiter statistics
///
/// # Middleware
/// - CORS: origin allow-list, `GET, OPTIONS`, 24h preflight max-age
/// - Tracing: logs all requests for debugging
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid allowed origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(86_400));

    Router::new()
        .route("/api/players", get(players_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
