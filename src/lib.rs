//! Props Proxy - a caching, rate-limited proxy for a third-party
//! player-props API
//!
//! Shapes inbound requests through a sliding-window rate limiter, a TTL
//! response cache, and a bounded-retry upstream fetch.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
