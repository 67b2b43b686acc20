//! Enumeration types for the Riftwatch match telemetry core.
//!
//! Every enumeration that arrives on the wire as a bare string (turret lanes,
//! dragon types, event kind tags) is resolved by name here. Resolution is
//! exact and case-sensitive; an unmapped name yields [`UnknownVariant`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A string on the wire did not name any variant of the target enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownVariant {
    /// Which enumeration was being resolved (e.g. `"turret lane"`).
    pub kind: &'static str,
    /// The name that failed to resolve.
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Turret lanes
// ---------------------------------------------------------------------------

/// The lane a destroyed turret stood in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum TurretLane {
    /// Bottom lane.
    Bot,
    /// Middle lane.
    Mid,
    /// Top lane.
    Top,
}

impl TurretLane {
    /// The wire name of the lane.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bot => "bot",
            Self::Mid => "mid",
            Self::Top => "top",
        }
    }
}

impl FromStr for TurretLane {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bot" => Ok(Self::Bot),
            "mid" => Ok(Self::Mid),
            "top" => Ok(Self::Top),
            other => Err(UnknownVariant::new("turret lane", other)),
        }
    }
}

impl fmt::Display for TurretLane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Dragon types
// ---------------------------------------------------------------------------

/// The elemental type of a slain dragon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum DragonType {
    /// Water (ocean) drake.
    Water,
    /// Air (cloud) drake.
    Air,
    /// Earth (mountain) drake.
    Earth,
}

impl DragonType {
    /// The wire name of the dragon type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Air => "air",
            Self::Earth => "earth",
        }
    }
}

impl FromStr for DragonType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "water" => Ok(Self::Water),
            "air" => Ok(Self::Air),
            "earth" => Ok(Self::Earth),
            other => Err(UnknownVariant::new("dragon type", other)),
        }
    }
}

impl fmt::Display for DragonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// The `type` tag carried by every telemetry event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum EventKind {
    /// Match setup. Consumed when the registry is built, ignored afterwards.
    MatchStart,
    /// A dead player came back to life.
    PlayerRevive,
    /// A team slew Baron Nashor.
    NashorKill,
    /// A player last-hit a minion.
    MinionKill,
    /// The match finished with a winner.
    MatchEnd,
    /// A turret fell.
    TurretDestroy,
    /// A player died, possibly to another player.
    PlayerKill,
    /// A team slew an elemental dragon.
    DragonKill,
    /// An event the feed could not classify.
    Unknown,
}

impl EventKind {
    /// Every kind, in wire declaration order.
    pub const ALL: [Self; 9] = [
        Self::MatchStart,
        Self::PlayerRevive,
        Self::NashorKill,
        Self::MinionKill,
        Self::MatchEnd,
        Self::TurretDestroy,
        Self::PlayerKill,
        Self::DragonKill,
        Self::Unknown,
    ];

    /// The wire tag of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MatchStart => "MATCH_START",
            Self::PlayerRevive => "PLAYER_REVIVE",
            Self::NashorKill => "NASHOR_KILL",
            Self::MinionKill => "MINION_KILL",
            Self::MatchEnd => "MATCH_END",
            Self::TurretDestroy => "TURRET_DESTROY",
            Self::PlayerKill => "PLAYER_KILL",
            Self::DragonKill => "DRAGON_KILL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl FromStr for EventKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("event type", s))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
