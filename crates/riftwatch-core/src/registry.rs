//! The match registry: both teams, the fixture, and match-level outcome.
//!
//! A [`Match`] is built once from the match-start document and then only
//! mutated by the dispatcher's handlers. It resolves feed IDs into
//! [`PlayerHandle`]s and [`TeamSide`]s; handlers resolve every reference an
//! event makes before they mutate anything.

use std::collections::BTreeSet;

use riftwatch_types::{MatchId, MatchStart, PlayerId, TeamId, TeamRoster};
use tracing::warn;

use crate::config::WinnerPolicy;
use crate::entity::{Fixture, Player, PlayerHandle, ROSTER_SIZE, TEAM_COUNT, Team, TeamSide};
use crate::error::{EventError, SetupError};

/// Authoritative state of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    id: MatchId,
    fixture: Fixture,
    blue: Team,
    red: Team,
    winning_team: Option<TeamSide>,
    event_failures: u64,
}

impl Match {
    /// Build a registry from a match-start document.
    ///
    /// Validates that there are exactly [`TEAM_COUNT`] teams of exactly
    /// [`ROSTER_SIZE`] players, that team IDs are distinct and player IDs
    /// unique across both rosters, and that the fixture start time parses.
    /// Teams are named Blue and Red by position.
    pub fn new(start: &MatchStart, starting_gold: u32) -> Result<Self, SetupError> {
        let [blue, red] = rosters(&start.payload.teams)?;
        check_ids(blue, red)?;

        let fixture = Fixture::from_payload(&start.payload.fixture)?;

        Ok(Self {
            id: start.match_id.clone(),
            fixture,
            blue: build_team(blue, TeamSide::Blue, starting_gold),
            red: build_team(red, TeamSide::Red, starting_gold),
            winning_team: None,
            event_failures: 0,
        })
    }

    /// Decode a match-start document from JSON and build the registry.
    pub fn from_json(raw: &[u8], starting_gold: u32) -> Result<Self, SetupError> {
        let start: MatchStart = serde_json::from_slice(raw)?;
        Self::new(&start, starting_gold)
    }

    /// The match identifier.
    pub const fn id(&self) -> &MatchId {
        &self.id
    }

    /// Scheduling metadata.
    pub const fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    /// The team on the given side.
    pub const fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Blue => &self.blue,
            TeamSide::Red => &self.red,
        }
    }

    /// Both teams in registry order (Blue, then Red).
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        [&self.blue, &self.red].into_iter()
    }

    /// The winning team, once a `MATCH_END` has been applied.
    pub const fn winning_team(&self) -> Option<&Team> {
        match self.winning_team {
            Some(side) => Some(self.team(side)),
            None => None,
        }
    }

    /// Number of raw payloads that failed to decode.
    pub const fn event_failures(&self) -> u64 {
        self.event_failures
    }

    /// Find the player with the given ID.
    ///
    /// Scans Blue before Red; the first roster containing the ID wins.
    pub fn resolve_player(&self, id: &PlayerId) -> Result<PlayerHandle, EventError> {
        TeamSide::ALL
            .into_iter()
            .find_map(|side| {
                self.team(side)
                    .slot_of(id)
                    .map(|slot| PlayerHandle { side, slot })
            })
            .ok_or_else(|| EventError::UnknownPlayer(id.clone()))
    }

    /// Find the team with the given ID.
    pub fn resolve_team(&self, id: &TeamId) -> Result<TeamSide, EventError> {
        TeamSide::ALL
            .into_iter()
            .find(|&side| self.team(side).id() == id)
            .ok_or_else(|| EventError::UnknownTeam(id.clone()))
    }

    /// The player a handle refers to.
    pub fn player(&self, handle: PlayerHandle) -> Option<&Player> {
        self.team(handle.side).player_at(handle.slot)
    }

    /// The player with the most kills, if anyone has one.
    ///
    /// Only a strictly greater count replaces the current leader, so ties
    /// go to whoever comes first in registry order.
    pub fn top_killer(&self) -> Option<&Player> {
        let mut best: Option<&Player> = None;
        for player in self.teams().flat_map(Team::players) {
            let leader = best.map_or(0, Player::kills);
            if player.kills() > leader {
                best = Some(player);
            }
        }
        best
    }

    pub(crate) const fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Blue => &mut self.blue,
            TeamSide::Red => &mut self.red,
        }
    }

    /// Apply `update` to the player a handle refers to.
    ///
    /// Handles come from [`Match::resolve_player`], so the slot is always
    /// populated.
    pub(crate) fn update_player(&mut self, handle: PlayerHandle, update: impl FnOnce(&mut Player)) {
        if let Some(player) = self.team_mut(handle.side).player_at_mut(handle.slot) {
            update(player);
        }
    }

    /// Record the winner according to `policy`.
    pub(crate) fn record_winner(
        &mut self,
        side: TeamSide,
        policy: WinnerPolicy,
    ) -> Result<(), EventError> {
        if let Some(previous) = self.winning_team {
            match policy {
                WinnerPolicy::Reject => {
                    return Err(EventError::AlreadyDecided {
                        winner: previous.name(),
                    });
                }
                WinnerPolicy::LastWriteWins => {
                    warn!(
                        match_id = %self.id,
                        previous = %previous,
                        winner = %side,
                        "match winner overwritten by a later MATCH_END"
                    );
                }
            }
        }
        self.winning_team = Some(side);
        Ok(())
    }

    pub(crate) const fn record_event_failure(&mut self) {
        self.event_failures = self.event_failures.saturating_add(1);
    }
}

/// Split the roster list into exactly two rosters of exactly five.
fn rosters(teams: &[TeamRoster]) -> Result<[&TeamRoster; TEAM_COUNT], SetupError> {
    let [blue, red] = teams else {
        return Err(SetupError::MalformedRoster {
            reason: format!("there should be {TEAM_COUNT} teams, found {}", teams.len()),
        });
    };

    for roster in [blue, red] {
        if roster.players.len() != ROSTER_SIZE {
            return Err(SetupError::MalformedRoster {
                reason: format!(
                    "there should be {ROSTER_SIZE} players in each team, team {} has {}",
                    roster.team_id,
                    roster.players.len()
                ),
            });
        }
    }

    Ok([blue, red])
}

fn check_ids(blue: &TeamRoster, red: &TeamRoster) -> Result<(), SetupError> {
    if blue.team_id == red.team_id {
        return Err(SetupError::MalformedRoster {
            reason: format!("both teams share the ID {}", blue.team_id),
        });
    }

    if blue.team_id.as_str().is_empty() || red.team_id.as_str().is_empty() {
        return Err(SetupError::MalformedRoster {
            reason: "team IDs must not be empty".to_owned(),
        });
    }

    let mut seen = BTreeSet::new();
    for player in blue.players.iter().chain(&red.players) {
        if player.player_id.as_str().is_empty() {
            return Err(SetupError::MalformedRoster {
                reason: "player IDs must not be empty".to_owned(),
            });
        }
        if !seen.insert(&player.player_id) {
            return Err(SetupError::MalformedRoster {
                reason: format!("player ID {} appears more than once", player.player_id),
            });
        }
    }
    Ok(())
}

fn build_team(roster: &TeamRoster, side: TeamSide, starting_gold: u32) -> Team {
    let players = roster
        .players
        .iter()
        .map(|p| Player::new(p.player_id.clone(), p.name.clone(), starting_gold))
        .collect();
    Team::new(roster.team_id.clone(), side, players)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use riftwatch_types::{FixturePayload, MatchStartPayload, RosterPlayer};

    use super::*;
    use crate::entity::STARTING_GOLD;

    fn roster(team: &str, players: usize) -> TeamRoster {
        TeamRoster {
            team_id: TeamId::from(team),
            players: (1..=players)
                .map(|i| RosterPlayer {
                    player_id: PlayerId::new(format!("{team}-p{i}")),
                    name: format!("{team} player {i}"),
                })
                .collect(),
        }
    }

    fn start(teams: Vec<TeamRoster>) -> MatchStart {
        MatchStart {
            match_id: MatchId::from("m-1"),
            payload: MatchStartPayload {
                fixture: FixturePayload {
                    series_current: 1,
                    series_max: 5,
                    series_type: "BEST_OF".to_owned(),
                    title: "Final".to_owned(),
                    start_time: "2019-11-10T12:00:00Z".to_owned(),
                },
                teams,
            },
        }
    }

    fn standard() -> Match {
        Match::new(&start(vec![roster("t1", 5), roster("t2", 5)]), STARTING_GOLD).unwrap()
    }

    #[test]
    fn teams_are_named_by_position() {
        let m = standard();
        let names: Vec<_> = m.teams().map(|t| (t.id().as_str(), t.name())).collect();
        assert_eq!(names, vec![("t1", "Blue"), ("t2", "Red")]);
        assert!(m.winning_team().is_none());
        assert_eq!(m.event_failures(), 0);
    }

    #[test]
    fn every_player_starts_with_the_purse() {
        let m = Match::new(&start(vec![roster("t1", 5), roster("t2", 5)]), 650).unwrap();
        assert!(m.teams().flat_map(Team::players).all(|p| p.gold() == 650));
    }

    #[test]
    fn wrong_team_count_is_malformed() {
        for teams in [vec![roster("t1", 5)], vec![roster("t1", 5), roster("t2", 5), roster("t3", 5)]] {
            let result = Match::new(&start(teams), STARTING_GOLD);
            assert!(matches!(result, Err(SetupError::MalformedRoster { .. })));
        }
    }

    #[test]
    fn wrong_player_count_is_malformed() {
        for size in [4, 6] {
            let result = Match::new(&start(vec![roster("t1", 5), roster("t2", size)]), STARTING_GOLD);
            assert!(matches!(result, Err(SetupError::MalformedRoster { .. })));
        }
    }

    #[test]
    fn duplicate_ids_are_malformed() {
        let same_team = Match::new(&start(vec![roster("t1", 5), roster("t1", 5)]), STARTING_GOLD);
        assert!(matches!(same_team, Err(SetupError::MalformedRoster { .. })));

        let mut red = roster("t2", 5);
        red.players[0].player_id = PlayerId::from("t1-p3");
        let shared_player = Match::new(&start(vec![roster("t1", 5), red]), STARTING_GOLD);
        assert!(matches!(shared_player, Err(SetupError::MalformedRoster { .. })));
    }

    #[test]
    fn empty_ids_are_malformed() {
        let mut blue = roster("t1", 5);
        blue.players[2].player_id = PlayerId::from("");
        let result = Match::new(&start(vec![blue, roster("t2", 5)]), STARTING_GOLD);
        assert!(matches!(result, Err(SetupError::MalformedRoster { .. })));

        let nameless = Match::new(&start(vec![roster("t1", 5), roster("", 5)]), STARTING_GOLD);
        assert!(matches!(nameless, Err(SetupError::MalformedRoster { .. })));
    }

    #[test]
    fn resolves_players_across_both_teams() {
        let m = standard();
        let blue = m.resolve_player(&PlayerId::from("t1-p2")).unwrap();
        let red = m.resolve_player(&PlayerId::from("t2-p5")).unwrap();
        assert_eq!(blue, PlayerHandle { side: TeamSide::Blue, slot: 1 });
        assert_eq!(red, PlayerHandle { side: TeamSide::Red, slot: 4 });
        assert_eq!(m.player(red).unwrap().name(), "t2 player 5");
    }

    #[test]
    fn unknown_ids_fail_resolution() {
        let m = standard();
        assert!(matches!(
            m.resolve_player(&PlayerId::from("ghost")),
            Err(EventError::UnknownPlayer(id)) if id.as_str() == "ghost"
        ));
        assert!(matches!(
            m.resolve_team(&TeamId::from("t9")),
            Err(EventError::UnknownTeam(_))
        ));
        assert_eq!(m.resolve_team(&TeamId::from("t2")).unwrap(), TeamSide::Red);
    }

    #[test]
    fn last_write_wins_overwrites_winner() {
        let mut m = standard();
        m.record_winner(TeamSide::Blue, WinnerPolicy::LastWriteWins).unwrap();
        m.record_winner(TeamSide::Red, WinnerPolicy::LastWriteWins).unwrap();
        assert_eq!(m.winning_team().map(Team::name), Some("Red"));
    }

    #[test]
    fn reject_policy_keeps_first_winner() {
        let mut m = standard();
        m.record_winner(TeamSide::Red, WinnerPolicy::Reject).unwrap();
        let second = m.record_winner(TeamSide::Blue, WinnerPolicy::Reject);
        assert!(matches!(second, Err(EventError::AlreadyDecided { winner: "Red" })));
        assert_eq!(m.winning_team().map(Team::name), Some("Red"));
    }

    #[test]
    fn top_killer_prefers_strictly_greater_counts() {
        let mut m = standard();
        assert!(m.top_killer().is_none());

        let blue = m.resolve_player(&PlayerId::from("t1-p4")).unwrap();
        let red = m.resolve_player(&PlayerId::from("t2-p1")).unwrap();
        m.update_player(blue, |p| p.record_kill());
        m.update_player(red, |p| p.record_kill());
        assert_eq!(m.top_killer().map(Player::name), Some("t1 player 4"));

        m.update_player(red, |p| p.record_kill());
        assert_eq!(m.top_killer().map(Player::name), Some("t2 player 1"));
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            Match::from_json(b"{not json", STARTING_GOLD),
            Err(SetupError::Decode { .. })
        ));
    }
}
