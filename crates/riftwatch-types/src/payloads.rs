//! Wire payloads consumed by the Riftwatch core.
//!
//! Field names follow the feed's camelCase-with-`ID` convention, so most
//! fields carry an explicit `serde(rename)`. Unknown extra fields are
//! ignored; missing required fields fail deserialization.

use core::num::NonZeroU32;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{MatchId, PlayerId, TeamId};

// ---------------------------------------------------------------------------
// Match start
// ---------------------------------------------------------------------------

/// The match-start document used to build a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStart {
    /// Identifier of the match.
    #[serde(rename = "matchID")]
    pub match_id: MatchId,
    /// Fixture metadata and rosters.
    pub payload: MatchStartPayload,
}

/// Body of a [`MatchStart`] document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStartPayload {
    /// Scheduling metadata.
    pub fixture: FixturePayload,
    /// Team rosters in display order (Blue first, Red second).
    pub teams: Vec<TeamRoster>,
}

/// Scheduling metadata as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixturePayload {
    /// Game number within the series.
    pub series_current: u32,
    /// Maximum number of games in the series.
    pub series_max: u32,
    /// Series format label (e.g. `"BEST_OF"`).
    pub series_type: String,
    /// Human-readable fixture title.
    pub title: String,
    /// Scheduled start, formatted `YYYY-MM-DDTHH:MM:SSZ`.
    pub start_time: String,
}

/// One team's roster in the match-start document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoster {
    /// Identifier of the team.
    #[serde(rename = "teamID")]
    pub team_id: TeamId,
    /// The team's players.
    pub players: Vec<RosterPlayer>,
}

/// One player entry in a [`TeamRoster`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPlayer {
    /// Identifier of the player.
    #[serde(rename = "playerID")]
    pub player_id: PlayerId,
    /// Display name.
    pub name: String,
}

// ---------------------------------------------------------------------------
// Event envelope
// ---------------------------------------------------------------------------

/// A decoded but not yet routed telemetry event.
///
/// The `type` tag is kept as a raw string so that routing, not decoding,
/// decides whether the tag is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// The event kind tag (e.g. `"PLAYER_KILL"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Kind-specific body.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl RawEvent {
    /// Build an envelope from a tag and a JSON body.
    pub fn new(kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

/// Treats an empty ID the same as an absent one.
fn present<T: AsRef<str>>(id: Option<&T>) -> Option<&T> {
    id.filter(|id| !id.as_ref().is_empty())
}

/// Deserialize a field that may be missing or `null`, keeping the two
/// apart. Pair with `#[serde(default)]` so a missing field stays `None`.
#[allow(clippy::option_option)]
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Per-kind payloads
// ---------------------------------------------------------------------------

/// Body of a `PLAYER_REVIVE` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRevive {
    /// The revived player.
    #[serde(rename = "playerID")]
    pub player_id: PlayerId,
}

/// Body of a `NASHOR_KILL` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NashorKill {
    /// The player who landed the kill; their team gets the reward.
    #[serde(rename = "killerID")]
    pub killer_id: PlayerId,
    /// Gold granted to every member of the killing team.
    #[serde(rename = "teamGoldGranted")]
    pub team_gold_granted: u32,
}

/// Body of a `MINION_KILL` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinionKill {
    /// The player who last-hit the minion.
    #[serde(rename = "playerID")]
    pub player_id: PlayerId,
    /// Gold granted to that player.
    #[serde(rename = "goldGranted")]
    pub gold_granted: u32,
}

/// Body of a `MATCH_END` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEnd {
    /// The team that won.
    #[serde(rename = "winningTeamID")]
    pub winning_team_id: TeamId,
}

/// Body of a `TURRET_DESTROY` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurretDestroy {
    /// The player who landed the last hit, if a player did.
    #[serde(rename = "killerID", default)]
    pub killer_id: Option<PlayerId>,
    /// The team credited when no player landed the last hit. The outer
    /// `Option` is `None` when the field is missing, the inner one when it
    /// is `null`.
    #[allow(clippy::option_option)]
    #[serde(
        rename = "killerTeamID",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub killer_team_id: Option<Option<TeamId>>,
    /// Turret tier, starting at 1.
    #[serde(rename = "turretTier")]
    pub turret_tier: NonZeroU32,
    /// Lane name, resolved to a `TurretLane` by the handler.
    #[serde(rename = "turretLane")]
    pub turret_lane: String,
    /// Gold granted to the killer only.
    #[serde(rename = "playerGoldGranted", default)]
    pub player_gold_granted: u32,
    /// Gold granted to every other team member.
    #[serde(rename = "teamGoldGranted")]
    pub team_gold_granted: u32,
}

impl TurretDestroy {
    /// The killer, if present and non-empty.
    pub fn killer(&self) -> Option<&PlayerId> {
        present(self.killer_id.as_ref())
    }

    /// The crediting team. `None` when the field is missing, `Some(None)`
    /// when it was sent as `null` or empty.
    #[allow(clippy::option_option)]
    pub fn killer_team(&self) -> Option<Option<&TeamId>> {
        self.killer_team_id
            .as_ref()
            .map(|id| present(id.as_ref()))
    }
}

/// Body of a `PLAYER_KILL` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerKill {
    /// The killing player; absent for executions and environmental deaths.
    #[serde(rename = "killerID", default)]
    pub killer_id: Option<PlayerId>,
    /// Players credited with an assist.
    #[serde(default)]
    pub assistants: Option<Vec<PlayerId>>,
    /// Gold granted to each assistant.
    #[serde(rename = "assistGold", default)]
    pub assist_gold: u32,
    /// Gold granted to the killer.
    #[serde(rename = "goldGranted", default)]
    pub gold_granted: u32,
    /// The player who died.
    #[serde(rename = "victimID")]
    pub victim_id: PlayerId,
}

impl PlayerKill {
    /// The killer, if present and non-empty.
    pub fn killer(&self) -> Option<&PlayerId> {
        present(self.killer_id.as_ref())
    }

    /// The assistants, empty when the field is missing or null.
    pub fn assistants(&self) -> &[PlayerId] {
        self.assistants.as_deref().unwrap_or_default()
    }
}

/// Body of a `DRAGON_KILL` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragonKill {
    /// The player who landed the kill; their team gets the reward.
    #[serde(rename = "killerID")]
    pub killer_id: PlayerId,
    /// Dragon type name, resolved to a `DragonType` by the handler.
    #[serde(rename = "dragonType")]
    pub dragon_type: String,
    /// Gold granted to every member of the killing team.
    #[serde(rename = "goldGranted")]
    pub gold_granted: u32,
}
