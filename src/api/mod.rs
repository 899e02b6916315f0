//! API Module
//!
//! HTTP handlers and routing for the props proxy.
//!
//! # Endpoints
//! - `GET /api/players` - Rate-limited, cached players snapshot
//! - `OPTIONS /api/players` - CORS preflight (answered by the CORS layer)
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache and limiter statistics

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
