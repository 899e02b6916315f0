//! Player Card Module
//!
//! The internal player shape produced from validated upstream records.
//! Field names serialize to the camelCase contract the consuming UI expects.

use serde::{Deserialize, Serialize};

/// Stat label attached to every card produced by this service.
pub const STAT_LABEL: &str = "Shots on Target";

// == Player Card ==
/// One transformed player prop, ready to render.
///
/// Invariant: `id` and `name` are always non-empty. Records that cannot
/// satisfy this are dropped during transformation and never reach the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCard {
    /// Upstream player identifier
    pub id: String,
    /// Player display name
    pub name: String,
    /// The player's own team nickname
    pub team: String,
    /// Human-readable position name
    pub position: String,
    /// Opposing team nickname
    #[serde(rename = "match")]
    pub opponent: String,
    /// Human-readable game start, e.g. "Sat, Mar 8, 7:30 PM"
    pub date: String,
    /// Stat label for the line
    pub stat: String,
    /// Line value as displayed, e.g. "1.5"
    pub value: String,
    /// Best available avatar URL, empty string when none exists
    pub avatar: String,
    /// Whether the game is live right now
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_live: Option<bool>,
    /// League the game belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
    /// Shirt number when the upstream record carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}
