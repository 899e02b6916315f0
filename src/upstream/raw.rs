//! Raw upstream payload types
//!
//! Mirrors the subset of the props endpoint's JSON that this service reads.
//! Every field defaults, so one malformed record deserializes leniently and is
//! judged by the transform step instead of failing the whole payload.

use serde::Deserialize;

/// One raw prop record from the upstream `props` array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawProp {
    pub player: RawPlayer,
    pub game: RawGame,
    pub props: Vec<RawLine>,
}

/// Player block of a raw record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPlayer {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub image_url128: String,
    pub position: String,
    pub team: RawTeamRef,
    pub number: Option<String>,
}

/// Team reference carried on the player block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTeamRef {
    pub id: String,
}

/// Game block of a raw record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawGame {
    pub is_live: bool,
    pub start_date: String,
    pub league: String,
    pub home_team: RawTeam,
    pub away_team: RawTeam,
}

/// Team block with display data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTeam {
    pub id: String,
    pub nickname: String,
}

/// One betting line attached to a record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawLine {
    pub bet_points: Option<f64>,
    #[serde(rename = "type")]
    pub line_type: String,
}
