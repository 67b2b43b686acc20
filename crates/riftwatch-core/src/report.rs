//! Snapshotting a live match into a [`MatchReport`].

use riftwatch_types::{MatchReport, PlayerReport, TeamReport, TurretReport};

use crate::dispatcher::EventDispatcher;
use crate::entity::{Dragon, Player, Team};
use crate::registry::Match;

/// Build a detached report from a registry and its dispatcher's counters.
pub fn build_report(registry: &Match, dispatcher: &EventDispatcher) -> MatchReport {
    MatchReport {
        match_id: registry.id().clone(),
        title: registry.fixture().title.clone(),
        start_time: registry.fixture().start_time,
        winner: registry.winning_team().map(|team| team.name().to_owned()),
        event_failures: registry.event_failures(),
        events_applied: dispatcher.counters().clone(),
        teams: registry.teams().map(team_report).collect(),
        top_killer: registry.top_killer().map(player_report),
    }
}

fn team_report(team: &Team) -> TeamReport {
    TeamReport {
        team_id: team.id().clone(),
        name: team.name().to_owned(),
        nashor_kills: team.nashor_kills(),
        dragons: team.killed_dragons().iter().map(Dragon::kind).collect(),
        turrets: team
            .destroyed_turrets()
            .iter()
            .map(|turret| TurretReport {
                tier: turret.tier().get(),
                lane: turret.lane(),
            })
            .collect(),
        players: team.players().iter().map(player_report).collect(),
    }
}

fn player_report(player: &Player) -> PlayerReport {
    PlayerReport {
        player_id: player.id().clone(),
        name: player.name().to_owned(),
        gold: player.gold(),
        alive: player.is_alive(),
        kills: player.kills(),
        deaths: player.deaths(),
        assists: player.assists(),
        minions: player.minions(),
    }
}
