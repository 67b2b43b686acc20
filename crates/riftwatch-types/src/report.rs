//! Read-only match summaries.
//!
//! A [`MatchReport`] is a detached snapshot of a session: it owns its data
//! and can be serialized for dashboards or printed by the replay tool.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DragonType, EventKind, TurretLane};
use crate::ids::{MatchId, PlayerId, TeamId};

/// Summary of one match at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MatchReport {
    /// Identifier of the match.
    pub match_id: MatchId,
    /// Fixture title.
    pub title: String,
    /// Scheduled start of the fixture.
    pub start_time: DateTime<Utc>,
    /// Display name of the winning team, once decided.
    pub winner: Option<String>,
    /// Raw payloads that could not be decoded.
    pub event_failures: u64,
    /// Successfully applied events per kind.
    pub events_applied: BTreeMap<EventKind, u64>,
    /// Per-team statistics, Blue first.
    pub teams: Vec<TeamReport>,
    /// Player with the most kills, if anyone has scored one.
    pub top_killer: Option<PlayerReport>,
}

/// Statistics for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TeamReport {
    /// Identifier of the team.
    pub team_id: TeamId,
    /// Display name (`"Blue"` or `"Red"`).
    pub name: String,
    /// Barons slain.
    pub nashor_kills: u32,
    /// Dragons slain, in kill order.
    pub dragons: Vec<DragonType>,
    /// Turrets destroyed, in destruction order.
    pub turrets: Vec<TurretReport>,
    /// Roster statistics in roster order.
    pub players: Vec<PlayerReport>,
}

impl TeamReport {
    /// Number of dragons slain.
    pub fn dragon_kills(&self) -> usize {
        self.dragons.len()
    }

    /// Number of turrets destroyed.
    pub fn towers_destroyed(&self) -> usize {
        self.turrets.len()
    }
}

/// A destroyed turret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TurretReport {
    /// Turret tier.
    pub tier: u32,
    /// Turret lane.
    pub lane: TurretLane,
}

/// Statistics for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerReport {
    /// Identifier of the player.
    pub player_id: PlayerId,
    /// Display name.
    pub name: String,
    /// Gold earned, including the starting purse.
    pub gold: u32,
    /// Whether the player is currently alive.
    pub alive: bool,
    /// Champion kills.
    pub kills: u32,
    /// Deaths.
    pub deaths: u32,
    /// Kill assists.
    pub assists: u32,
    /// Minions last-hit.
    pub minions: u32,
}
