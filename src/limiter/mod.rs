//! Rate Limiter Module
//!
//! Per-client sliding-window admission control.

mod window;

pub use window::{RateDecision, SlidingWindowLimiter};
