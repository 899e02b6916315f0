//! Upstream Module
//!
//! Everything that talks to the third-party props endpoint: the HTTP client,
//! the raw payload types, the record transform, and the retry wrapper.

mod client;
mod raw;
mod retry;
mod transform;

use async_trait::async_trait;

use crate::error::UpstreamResult;
use crate::models::PlayerCard;

pub use client::UpstreamClient;
pub use raw::{RawGame, RawLine, RawPlayer, RawProp, RawTeam};
pub use retry::{fetch_with_retry, RetryPolicy};
pub use transform::{transform_record, transform_response};

// == Player Source ==
/// Source of transformed player lists.
///
/// The request handler depends on this seam rather than on the concrete
/// client, so tests inject scripted sources and production injects
/// [`UpstreamClient`].
#[async_trait]
pub trait PlayerSource: Send + Sync {
    /// Fetches, validates, and transforms one players snapshot.
    async fn fetch_players(&self) -> UpstreamResult<Vec<PlayerCard>>;
}
