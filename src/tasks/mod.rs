//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Cleanup: evicts expired cache entries and idle rate-limiter clients

mod cleanup;

pub use cleanup::spawn_cleanup_task;
