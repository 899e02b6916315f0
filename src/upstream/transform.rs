//! Transform Module
//!
//! Turns validated raw upstream records into [`PlayerCard`]s. Individual bad
//! records are dropped and logged; they never fail the whole payload.

use chrono::DateTime;
use serde_json::Value;
use tracing::warn;

use crate::error::{UpstreamError, UpstreamResult};
use crate::models::player::STAT_LABEL;
use crate::models::PlayerCard;
use crate::upstream::raw::RawProp;

/// Line value used when no prop carries a usable bet point.
const FALLBACK_LINE_VALUE: f64 = 0.5;

// == Response Transform ==
/// Validates the payload shape and transforms every well-formed record.
///
/// The payload must carry a `props` array and a `pagination` object; anything
/// else is a schema mismatch that will not fix itself on retry.
pub fn transform_response(payload: &Value) -> UpstreamResult<Vec<PlayerCard>> {
    let props = payload
        .get("props")
        .and_then(Value::as_array)
        .ok_or_else(|| UpstreamError::Validation("payload missing props array".to_string()))?;

    if payload.get("pagination").is_none() {
        return Err(UpstreamError::Validation(
            "payload missing pagination".to_string(),
        ));
    }

    let mut cards = Vec::with_capacity(props.len());
    let mut dropped = 0usize;

    for raw_value in props {
        let card = serde_json::from_value::<RawProp>(raw_value.clone())
            .ok()
            .and_then(|raw| transform_record(&raw));
        match card {
            Some(card) => cards.push(card),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, kept = cards.len(), "dropped malformed player records");
    }

    Ok(cards)
}

// == Record Transform ==
/// Transforms one raw record, or None when it lacks a player id or name.
pub fn transform_record(raw: &RawProp) -> Option<PlayerCard> {
    if raw.player.id.is_empty() || raw.player.name.is_empty() {
        return None;
    }

    // The player's own team is whichever side matches their team id; the
    // opponent is the other side.
    let plays_at_home = raw.player.team.id == raw.game.home_team.id;
    let (team, opponent) = if plays_at_home {
        (&raw.game.home_team, &raw.game.away_team)
    } else {
        (&raw.game.away_team, &raw.game.home_team)
    };

    Some(PlayerCard {
        id: raw.player.id.clone(),
        name: raw.player.name.clone(),
        team: team.nickname.clone(),
        position: position_name(&raw.player.position).to_string(),
        opponent: opponent.nickname.clone(),
        date: format_game_date(&raw.game.start_date),
        stat: STAT_LABEL.to_string(),
        value: format_line_value(line_value(raw)),
        avatar: best_avatar(raw),
        is_live: Some(raw.game.is_live),
        league: (!raw.game.league.is_empty()).then(|| raw.game.league.clone()),
        number: raw.player.number.clone(),
    })
}

/// Bet point from the NORMAL line, else the first line, else the fallback.
fn line_value(raw: &RawProp) -> f64 {
    raw.props
        .iter()
        .find(|line| line.line_type == "NORMAL")
        .and_then(|line| line.bet_points)
        .filter(|v| *v > 0.0)
        .or_else(|| raw.props.first().and_then(|line| line.bet_points))
        .filter(|v| *v > 0.0)
        .unwrap_or(FALLBACK_LINE_VALUE)
}

/// Formats a line value without a trailing `.0` on whole numbers.
fn format_line_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Prefers the full-size avatar, falls back to the 128px variant.
fn best_avatar(raw: &RawProp) -> String {
    if !raw.player.image_url.is_empty() {
        raw.player.image_url.clone()
    } else {
        raw.player.image_url128.clone()
    }
}

/// Maps upstream position codes to display names.
fn position_name(code: &str) -> &'static str {
    match code {
        "F" => "Forward",
        "M" => "Midfielder",
        "D" => "Defender",
        "G" => "Goalkeeper",
        _ => "Player",
    }
}

/// Formats an RFC 3339 start date as e.g. "Sun, Mar 8, 7:30 PM".
///
/// An unparseable date passes through verbatim rather than dropping the record.
fn format_game_date(start_date: &str) -> String {
    match DateTime::parse_from_rfc3339(start_date) {
        Ok(dt) => dt.format("%a, %b %-d, %-I:%M %p").to_string(),
        Err(_) => start_date.to_string(),
    }
}
