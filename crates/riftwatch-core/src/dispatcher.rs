//! The event dispatcher: routes decoded events to their handlers.
//!
//! Routing is an immutable table from [`EventKind`] to handler function;
//! the only mutable dispatcher state is the per-kind success counter. A
//! handler runs to completion before the next event is looked at.
//!
//! # Handler contract
//!
//! 1. Decode the kind-specific body (failure: `MalformedPayload`).
//! 2. Resolve every referenced player and team, and every enum name.
//! 3. Only then mutate the registry and announce.
//!
//! Because every failure point sits before the first mutation, a failing
//! event leaves the registry exactly as it found it. Counters are bumped by
//! the dispatcher after the handler returns `Ok`.
//!
//! Handlers are not idempotent: delivering the same event twice applies it
//! twice. Deduplication is the caller's concern.

use std::collections::BTreeMap;

use riftwatch_types::{
    DragonKill, EventKind, MatchEnd, MinionKill, NashorKill, PlayerKill, PlayerRevive, RawEvent,
    TeamId, TurretDestroy,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::announce::{Announcement, Announcer};
use crate::config::WinnerPolicy;
use crate::entity::{Dragon, Turret};
use crate::error::EventError;
use crate::registry::Match;

/// Everything a handler may touch while applying one event.
pub struct HandlerContext<'a> {
    /// The registry being mutated.
    pub registry: &'a mut Match,
    /// Where announcements go.
    pub announcer: &'a mut dyn Announcer,
    /// Successful applications of this event's kind before this one.
    pub applied: u64,
    /// What a repeated `MATCH_END` does.
    pub winner_policy: WinnerPolicy,
}

/// A routine that applies one kind of event.
pub type Handler = fn(&mut HandlerContext<'_>, serde_json::Value) -> Result<(), EventError>;

/// The routing table. `MATCH_START` is deliberately absent: it is consumed
/// when the registry is built.
const ROUTES: [(EventKind, Handler); 8] = [
    (EventKind::PlayerRevive, handle_player_revive),
    (EventKind::NashorKill, handle_nashor_kill),
    (EventKind::MinionKill, handle_minion_kill),
    (EventKind::MatchEnd, handle_match_end),
    (EventKind::TurretDestroy, handle_turret_destroy),
    (EventKind::PlayerKill, handle_player_kill),
    (EventKind::Unknown, handle_unknown),
    (EventKind::DragonKill, handle_dragon_kill),
];

fn route(kind: EventKind) -> Option<Handler> {
    ROUTES
        .iter()
        .find(|(routed, _)| *routed == kind)
        .map(|&(_, handler)| handler)
}

/// Routes events to handlers and counts successful applications per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDispatcher {
    counters: BTreeMap<EventKind, u64>,
    winner_policy: WinnerPolicy,
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(WinnerPolicy::default())
    }
}

impl EventDispatcher {
    /// Create a dispatcher with every routed counter at zero.
    pub fn new(winner_policy: WinnerPolicy) -> Self {
        Self {
            counters: ROUTES.iter().map(|&(kind, _)| (kind, 0)).collect(),
            winner_policy,
        }
    }

    /// Successful applications of `kind` so far. Always 0 for unrouted kinds.
    pub fn count(&self, kind: EventKind) -> u64 {
        self.counters.get(&kind).copied().unwrap_or(0)
    }

    /// All routed kinds with their success counts.
    pub const fn counters(&self) -> &BTreeMap<EventKind, u64> {
        &self.counters
    }

    /// Apply one decoded event to the registry.
    ///
    /// `MATCH_START` is accepted and ignored without counting. An
    /// unrecognized tag fails with [`EventError::InvalidEventType`]. Any
    /// handler error is returned as-is and the kind's counter is left
    /// unchanged.
    pub fn process_event(
        &mut self,
        registry: &mut Match,
        announcer: &mut dyn Announcer,
        event: RawEvent,
    ) -> Result<EventKind, EventError> {
        let Ok(kind) = event.kind.parse::<EventKind>() else {
            return Err(EventError::InvalidEventType { tag: event.kind });
        };

        if kind == EventKind::MatchStart {
            debug!(match_id = %registry.id(), "MATCH_START ignored after setup");
            return Ok(kind);
        }

        let Some(handler) = route(kind) else {
            return Err(EventError::InvalidEventType { tag: event.kind });
        };

        let applied = self.count(kind);
        let mut ctx = HandlerContext {
            registry,
            announcer,
            applied,
            winner_policy: self.winner_policy,
        };
        handler(&mut ctx, event.payload)?;

        self.counters.insert(kind, applied.saturating_add(1));
        debug!(kind = %kind, applied = applied.saturating_add(1), "event applied");
        Ok(kind)
    }
}

/// Decode an event body into its kind-specific payload.
fn body<T: DeserializeOwned>(kind: EventKind, payload: serde_json::Value) -> Result<T, EventError> {
    serde_json::from_value(payload).map_err(|source| EventError::MalformedPayload { kind, source })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn handle_player_revive(
    ctx: &mut HandlerContext<'_>,
    payload: serde_json::Value,
) -> Result<(), EventError> {
    let event: PlayerRevive = body(EventKind::PlayerRevive, payload)?;
    let player = ctx.registry.resolve_player(&event.player_id)?;

    ctx.registry.update_player(player, |p| p.revive());
    Ok(())
}

fn handle_nashor_kill(
    ctx: &mut HandlerContext<'_>,
    payload: serde_json::Value,
) -> Result<(), EventError> {
    let event: NashorKill = body(EventKind::NashorKill, payload)?;
    let killer = ctx.registry.resolve_player(&event.killer_id)?;

    let team = ctx.registry.team_mut(killer.side);
    team.grant_gold_to_all(event.team_gold_granted, None);
    team.record_nashor_kill();

    ctx.announcer
        .announce(Announcement::NashorSlain { team: killer.side });
    Ok(())
}

fn handle_minion_kill(
    ctx: &mut HandlerContext<'_>,
    payload: serde_json::Value,
) -> Result<(), EventError> {
    let event: MinionKill = body(EventKind::MinionKill, payload)?;
    let player = ctx.registry.resolve_player(&event.player_id)?;

    ctx.registry.update_player(player, |p| {
        p.grant_gold(event.gold_granted);
        p.record_minion();
    });
    Ok(())
}

fn handle_match_end(
    ctx: &mut HandlerContext<'_>,
    payload: serde_json::Value,
) -> Result<(), EventError> {
    let event: MatchEnd = body(EventKind::MatchEnd, payload)?;
    let winner = ctx.registry.resolve_team(&event.winning_team_id)?;

    ctx.registry.record_winner(winner, ctx.winner_policy)?;

    ctx.announcer.announce(Announcement::MatchWon { team: winner });
    Ok(())
}

fn handle_turret_destroy(
    ctx: &mut HandlerContext<'_>,
    payload: serde_json::Value,
) -> Result<(), EventError> {
    let event: TurretDestroy = body(EventKind::TurretDestroy, payload)?;
    let turret = Turret::from_names(event.turret_tier, &event.turret_lane)?;

    // A killing player is rewarded individually and skipped in the team
    // payout. The skip compares handles, never ID strings.
    let (side, rewarded) = match (event.killer(), event.killer_team()) {
        (Some(killer_id), _) => {
            let killer = ctx.registry.resolve_player(killer_id)?;
            (killer.side, Some(killer))
        }
        (None, Some(Some(team_id))) => (ctx.registry.resolve_team(team_id)?, None),
        (None, Some(None)) => return Err(EventError::UnknownTeam(TeamId::from(""))),
        (None, None) => {
            return Err(EventError::MalformedPayload {
                kind: EventKind::TurretDestroy,
                source: serde::de::Error::missing_field("killerTeamID"),
            });
        }
    };

    if let Some(killer) = rewarded {
        ctx.registry
            .update_player(killer, |p| p.grant_gold(event.player_gold_granted));
    }

    let team = ctx.registry.team_mut(side);
    team.record_turret(turret);
    team.grant_gold_to_all(event.team_gold_granted, rewarded.map(|killer| killer.slot));

    ctx.announcer
        .announce(Announcement::TurretDestroyed { team: side, turret });
    Ok(())
}

fn handle_player_kill(
    ctx: &mut HandlerContext<'_>,
    payload: serde_json::Value,
) -> Result<(), EventError> {
    let event: PlayerKill = body(EventKind::PlayerKill, payload)?;

    let killer = event
        .killer()
        .map(|id| ctx.registry.resolve_player(id))
        .transpose()?;
    let assistants = event
        .assistants()
        .iter()
        .map(|id| ctx.registry.resolve_player(id))
        .collect::<Result<Vec<_>, _>>()?;
    let victim = ctx.registry.resolve_player(&event.victim_id)?;

    if let Some(killer) = killer {
        ctx.registry.update_player(killer, |p| {
            p.record_kill();
            p.grant_gold(event.gold_granted);
        });
    }
    for assistant in assistants {
        ctx.registry.update_player(assistant, |p| {
            p.record_assist();
            p.grant_gold(event.assist_gold);
        });
    }
    ctx.registry.update_player(victim, |p| p.record_death());

    // Only an attributed kill can be first blood. If the first PLAYER_KILL
    // has no killer, the counter moves past zero and no first blood is
    // ever announced for the match.
    if ctx.applied == 0
        && let Some(name) = killer
            .and_then(|killer| ctx.registry.player(killer))
            .map(|p| p.name().to_owned())
    {
        ctx.announcer
            .announce(Announcement::FirstBlood { player: name });
    }
    Ok(())
}

fn handle_dragon_kill(
    ctx: &mut HandlerContext<'_>,
    payload: serde_json::Value,
) -> Result<(), EventError> {
    let event: DragonKill = body(EventKind::DragonKill, payload)?;
    let dragon = Dragon::from_name(&event.dragon_type)?;
    let killer = ctx.registry.resolve_player(&event.killer_id)?;

    let team = ctx.registry.team_mut(killer.side);
    team.record_dragon(dragon);
    team.grant_gold_to_all(event.gold_granted, None);

    ctx.announcer.announce(Announcement::DragonSlain {
        team: killer.side,
        dragon,
    });
    Ok(())
}

#[allow(clippy::unnecessary_wraps, clippy::needless_pass_by_value)]
fn handle_unknown(
    _ctx: &mut HandlerContext<'_>,
    _payload: serde_json::Value,
) -> Result<(), EventError> {
    Ok(())
}
