//! Entity model: players, teams, turrets, dragons and the fixture.
//!
//! Entities are plain records. Readers are public; writers are
//! crate-private so that, after setup, only the dispatcher's handlers can
//! change entity state. All counters saturate instead of overflowing, which
//! keeps every stat monotonically non-decreasing.

use core::fmt;
use core::num::NonZeroU32;

use chrono::{DateTime, NaiveDateTime, Utc};
use riftwatch_types::{DragonType, FixturePayload, PlayerId, TeamId, TurretLane, UnknownVariant};

use crate::error::SetupError;

/// Number of teams in a match.
pub const TEAM_COUNT: usize = 2;

/// Number of players on each team.
pub const ROSTER_SIZE: usize = 5;

/// Gold every player holds when the match starts.
pub const STARTING_GOLD: u32 = 500;

/// Wire format of the fixture start time.
const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// ---------------------------------------------------------------------------
// Team side and player handles
// ---------------------------------------------------------------------------

/// Which of the two teams, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TeamSide {
    /// First team in the match-start document.
    Blue,
    /// Second team in the match-start document.
    Red,
}

impl TeamSide {
    /// Both sides in registry order.
    pub const ALL: [Self; TEAM_COUNT] = [Self::Blue, Self::Red];

    /// Display name assigned to the side.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Red => "Red",
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved reference to one roster slot.
///
/// Handles are produced by [`Match::resolve_player`] and compare by
/// identity: two handles are equal only if they denote the same player.
///
/// [`Match::resolve_player`]: crate::registry::Match::resolve_player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerHandle {
    /// The team the player belongs to.
    pub side: TeamSide,
    /// Position of the player in the team's roster.
    pub slot: usize,
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player and their running statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    gold: u32,
    alive: bool,
    kills: u32,
    deaths: u32,
    assists: u32,
    minions: u32,
}

impl Player {
    /// Create a living player with the given starting purse and no stats.
    pub(crate) const fn new(id: PlayerId, name: String, starting_gold: u32) -> Self {
        Self {
            id,
            name,
            gold: starting_gold,
            alive: true,
            kills: 0,
            deaths: 0,
            assists: 0,
            minions: 0,
        }
    }

    /// The player's identifier.
    pub const fn id(&self) -> &PlayerId {
        &self.id
    }

    /// The player's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gold earned so far, including the starting purse.
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    /// Whether the player is alive.
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Champion kills.
    pub const fn kills(&self) -> u32 {
        self.kills
    }

    /// Deaths.
    pub const fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Kill assists.
    pub const fn assists(&self) -> u32 {
        self.assists
    }

    /// Minions last-hit.
    pub const fn minions(&self) -> u32 {
        self.minions
    }

    pub(crate) const fn grant_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub(crate) const fn revive(&mut self) {
        self.alive = true;
    }

    pub(crate) const fn record_kill(&mut self) {
        self.kills = self.kills.saturating_add(1);
    }

    pub(crate) const fn record_assist(&mut self) {
        self.assists = self.assists.saturating_add(1);
    }

    pub(crate) const fn record_death(&mut self) {
        self.deaths = self.deaths.saturating_add(1);
        self.alive = false;
    }

    pub(crate) const fn record_minion(&mut self) {
        self.minions = self.minions.saturating_add(1);
    }
}

// ---------------------------------------------------------------------------
// Objectives
// ---------------------------------------------------------------------------

/// A destroyed turret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turret {
    tier: NonZeroU32,
    lane: TurretLane,
}

impl Turret {
    /// Create a turret record from a tier and an already resolved lane.
    pub const fn new(tier: NonZeroU32, lane: TurretLane) -> Self {
        Self { tier, lane }
    }

    /// Create a turret record, resolving the lane by its wire name.
    pub fn from_names(tier: NonZeroU32, lane: &str) -> Result<Self, UnknownVariant> {
        Ok(Self::new(tier, lane.parse()?))
    }

    /// Turret tier, starting at 1.
    pub const fn tier(&self) -> NonZeroU32 {
        self.tier
    }

    /// Turret lane.
    pub const fn lane(&self) -> TurretLane {
        self.lane
    }
}

impl fmt::Display for Turret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {} {} turret", self.tier, self.lane)
    }
}

/// A slain elemental dragon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dragon {
    kind: DragonType,
}

impl Dragon {
    /// Create a dragon record from an already resolved type.
    pub const fn new(kind: DragonType) -> Self {
        Self { kind }
    }

    /// Create a dragon record, resolving the type by its wire name.
    pub fn from_name(kind: &str) -> Result<Self, UnknownVariant> {
        Ok(Self::new(kind.parse()?))
    }

    /// The dragon's elemental type.
    pub const fn kind(&self) -> DragonType {
        self.kind
    }
}

impl fmt::Display for Dragon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// A team: its roster and the objectives it has taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: TeamId,
    side: TeamSide,
    nashor_kills: u32,
    killed_dragons: Vec<Dragon>,
    destroyed_turrets: Vec<Turret>,
    players: Vec<Player>,
}

impl Team {
    /// Create a team with a fixed roster and no objectives.
    pub(crate) const fn new(id: TeamId, side: TeamSide, players: Vec<Player>) -> Self {
        Self {
            id,
            side,
            nashor_kills: 0,
            killed_dragons: Vec::new(),
            destroyed_turrets: Vec::new(),
            players,
        }
    }

    /// The team's identifier.
    pub const fn id(&self) -> &TeamId {
        &self.id
    }

    /// The side this team plays on.
    pub const fn side(&self) -> TeamSide {
        self.side
    }

    /// Display name (`"Blue"` or `"Red"`).
    pub const fn name(&self) -> &'static str {
        self.side.name()
    }

    /// Barons slain.
    pub const fn nashor_kills(&self) -> u32 {
        self.nashor_kills
    }

    /// Dragons slain, in kill order.
    pub fn killed_dragons(&self) -> &[Dragon] {
        &self.killed_dragons
    }

    /// Turrets destroyed, in destruction order.
    pub fn destroyed_turrets(&self) -> &[Turret] {
        &self.destroyed_turrets
    }

    /// Number of dragons slain.
    pub fn dragon_kills(&self) -> usize {
        self.killed_dragons.len()
    }

    /// Number of turrets destroyed.
    pub fn towers_destroyed(&self) -> usize {
        self.destroyed_turrets.len()
    }

    /// The roster, in match-start order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub(crate) fn slot_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    pub(crate) fn player_at(&self, slot: usize) -> Option<&Player> {
        self.players.get(slot)
    }

    pub(crate) fn player_at_mut(&mut self, slot: usize) -> Option<&mut Player> {
        self.players.get_mut(slot)
    }

    /// Grant gold to every roster member, dead or alive, except `skip`.
    pub(crate) fn grant_gold_to_all(&mut self, amount: u32, skip: Option<usize>) {
        for (slot, player) in self.players.iter_mut().enumerate() {
            if Some(slot) != skip {
                player.grant_gold(amount);
            }
        }
    }

    pub(crate) const fn record_nashor_kill(&mut self) {
        self.nashor_kills = self.nashor_kills.saturating_add(1);
    }

    pub(crate) fn record_dragon(&mut self, dragon: Dragon) {
        self.killed_dragons.push(dragon);
    }

    pub(crate) fn record_turret(&mut self, turret: Turret) {
        self.destroyed_turrets.push(turret);
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// Scheduling metadata, fixed at match setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// Game number within the series.
    pub series_current: u32,
    /// Maximum number of games in the series.
    pub series_max: u32,
    /// Series format label.
    pub series_type: String,
    /// Human-readable fixture title.
    pub title: String,
    /// Scheduled start.
    pub start_time: DateTime<Utc>,
}

impl Fixture {
    /// Build a fixture from its wire form, parsing the start time.
    pub fn from_payload(payload: &FixturePayload) -> Result<Self, SetupError> {
        let start_time = NaiveDateTime::parse_from_str(&payload.start_time, START_TIME_FORMAT)
            .map_err(|source| SetupError::InvalidStartTime {
                value: payload.start_time.clone(),
                source,
            })?
            .and_utc();

        Ok(Self {
            series_current: payload.series_current,
            series_max: payload.series_max,
            series_type: payload.series_type.clone(),
            title: payload.title.clone(),
            start_time,
        })
    }
}
