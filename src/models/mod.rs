//! Data models for the props proxy
//!
//! This module defines the transformed player shape handed to the UI and the
//! DTOs used for serializing HTTP response bodies.

pub mod player;
pub mod responses;

// Re-export commonly used types
pub use player::PlayerCard;
pub use responses::{ErrorBody, HealthResponse, StatsResponse};
