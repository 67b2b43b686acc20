//! Ingestion: raw bytes in, applied events out.
//!
//! A [`MatchSession`] owns one match: its registry, its dispatcher, the
//! announcer that receives notifications and the decoder that turns raw
//! payloads into envelopes. Malformed input is absorbed here. It is
//! counted on the registry and logged, and the caller never sees it.

use riftwatch_types::{EventKind, MatchReport, RawEvent};
use tracing::warn;

use crate::announce::{Announcer, TracingAnnouncer};
use crate::config::RulesConfig;
use crate::dispatcher::EventDispatcher;
use crate::error::{DecodeError, EventError, SetupError};
use crate::registry::Match;
use crate::report::build_report;

/// Turns a raw payload into an event envelope.
pub trait EventDecoder {
    /// Decode one raw payload.
    fn decode(&self, raw: &[u8]) -> Result<RawEvent, DecodeError>;
}

/// Decodes `{"type": ..., "payload": ...}` JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEventDecoder;

impl EventDecoder for JsonEventDecoder {
    fn decode(&self, raw: &[u8]) -> Result<RawEvent, DecodeError> {
        Ok(serde_json::from_slice(raw)?)
    }
}

/// What happened to one raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The payload decoded and the event of this kind was applied.
    Applied(EventKind),
    /// The payload did not decode; it was tallied as an event failure.
    Rejected,
}

/// One live match and everything needed to feed it.
#[derive(Debug)]
pub struct MatchSession<A = TracingAnnouncer, D = JsonEventDecoder> {
    registry: Match,
    dispatcher: EventDispatcher,
    announcer: A,
    decoder: D,
}

impl MatchSession {
    /// Build a session from a raw match-start document, announcing through
    /// tracing and decoding JSON.
    pub fn start(raw_start: &[u8], rules: &RulesConfig) -> Result<Self, SetupError> {
        let registry = Match::from_json(raw_start, rules.starting_gold)?;
        Ok(Self::new(registry, rules))
    }

    /// Wrap an already built registry.
    pub fn new(registry: Match, rules: &RulesConfig) -> Self {
        Self::with_parts(registry, rules, TracingAnnouncer, JsonEventDecoder)
    }
}

impl<A: Announcer, D: EventDecoder> MatchSession<A, D> {
    /// Assemble a session from explicit parts.
    pub fn with_parts(registry: Match, rules: &RulesConfig, announcer: A, decoder: D) -> Self {
        Self {
            registry,
            dispatcher: EventDispatcher::new(rules.winner_policy),
            announcer,
            decoder,
        }
    }

    /// Decode a raw payload and apply it.
    ///
    /// A payload that fails to decode is counted and logged, and the call
    /// returns [`IngestOutcome::Rejected`]. Errors from applying a decoded
    /// event are returned to the caller.
    pub fn ingest(&mut self, raw: &[u8]) -> Result<IngestOutcome, EventError> {
        let event = match self.decoder.decode(raw) {
            Ok(event) => event,
            Err(e) => {
                self.registry.record_event_failure();
                warn!(
                    match_id = %self.registry.id(),
                    failures = self.registry.event_failures(),
                    error = %e,
                    "dropping undecodable event"
                );
                return Ok(IngestOutcome::Rejected);
            }
        };
        self.process_event(event).map(IngestOutcome::Applied)
    }

    /// Apply an already decoded event.
    pub fn process_event(&mut self, event: RawEvent) -> Result<EventKind, EventError> {
        self.dispatcher
            .process_event(&mut self.registry, &mut self.announcer, event)
    }

    /// The match registry.
    pub const fn registry(&self) -> &Match {
        &self.registry
    }

    /// The dispatcher and its counters.
    pub const fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// The announcer receiving this session's notifications.
    pub const fn announcer(&self) -> &A {
        &self.announcer
    }

    /// Snapshot the session into a report.
    pub fn report(&self) -> MatchReport {
        build_report(&self.registry, &self.dispatcher)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::announce::{RecordingAnnouncer, SilentAnnouncer};
    use crate::entity::STARTING_GOLD;

    const START: &str = r#"{
        "matchID": "m-7",
        "payload": {
            "fixture": {
                "seriesCurrent": 2,
                "seriesMax": 3,
                "seriesType": "BEST_OF",
                "title": "Semi-final",
                "startTime": "2019-11-10T12:00:00Z"
            },
            "teams": [
                { "teamID": "g2", "players": [
                    { "playerID": "g2-1", "name": "Wunder" },
                    { "playerID": "g2-2", "name": "Jankos" },
                    { "playerID": "g2-3", "name": "Caps" },
                    { "playerID": "g2-4", "name": "Perkz" },
                    { "playerID": "g2-5", "name": "Mikyx" }
                ]},
                { "teamID": "fpx", "players": [
                    { "playerID": "fpx-1", "name": "GimGoon" },
                    { "playerID": "fpx-2", "name": "Tian" },
                    { "playerID": "fpx-3", "name": "Doinb" },
                    { "playerID": "fpx-4", "name": "Lwx" },
                    { "playerID": "fpx-5", "name": "Crisp" }
                ]}
            ]
        }
    }"#;

    fn session() -> MatchSession<RecordingAnnouncer> {
        let registry = Match::from_json(START.as_bytes(), STARTING_GOLD).unwrap();
        MatchSession::with_parts(
            registry,
            &RulesConfig::default(),
            RecordingAnnouncer::new(),
            JsonEventDecoder,
        )
    }

    #[test]
    #[traced_test]
    fn malformed_json_is_absorbed() {
        let mut s = session();
        let outcome = s.ingest(b"{this is not json").unwrap();

        assert_eq!(outcome, IngestOutcome::Rejected);
        assert_eq!(s.registry().event_failures(), 1);
        assert!(s.dispatcher().counters().values().all(|&n| n == 0));
        assert!(logs_contain("dropping undecodable event"));
    }

    /// Refuses every payload, however well formed.
    struct RefusingDecoder;

    impl EventDecoder for RefusingDecoder {
        fn decode(&self, _raw: &[u8]) -> Result<RawEvent, DecodeError> {
            Err(DecodeError::Other {
                message: "feed paused".to_owned(),
            })
        }
    }

    #[test]
    #[traced_test]
    fn custom_decoder_failures_are_absorbed() {
        let registry = Match::from_json(START.as_bytes(), STARTING_GOLD).unwrap();
        let mut s =
            MatchSession::with_parts(registry, &RulesConfig::default(), SilentAnnouncer, RefusingDecoder);
        let outcome = s
            .ingest(br#"{"type": "MINION_KILL", "payload": {"playerID": "g2-3", "goldGranted": 21}}"#)
            .unwrap();

        assert_eq!(outcome, IngestOutcome::Rejected);
        assert_eq!(s.registry().event_failures(), 1);
        assert!(s.dispatcher().counters().values().all(|&n| n == 0));
        assert_eq!(s.report().teams[0].players[2].gold, STARTING_GOLD);
        assert!(logs_contain("undecodable event: feed paused"));
    }

    #[test]
    fn json_without_envelope_is_absorbed() {
        let mut s = session();
        assert_eq!(s.ingest(b"[1, 2, 3]").unwrap(), IngestOutcome::Rejected);
        assert_eq!(s.ingest(br#"{"payload": {}}"#).unwrap(), IngestOutcome::Rejected);
        assert_eq!(s.registry().event_failures(), 2);
    }

    #[test]
    fn decoded_events_reach_the_dispatcher() {
        let mut s = session();
        let outcome = s
            .ingest(br#"{"type": "MINION_KILL", "payload": {"playerID": "g2-3", "goldGranted": 21}}"#)
            .unwrap();

        assert_eq!(outcome, IngestOutcome::Applied(EventKind::MinionKill));
        assert_eq!(s.dispatcher().count(EventKind::MinionKill), 1);
        assert_eq!(s.report().teams[0].players[2].gold, 521);
    }

    #[test]
    fn dispatcher_errors_propagate() {
        let mut s = session();
        let result = s.ingest(br#"{"type": "PLAYER_REVIVE", "payload": {"playerID": "nobody"}}"#);
        assert!(matches!(result, Err(EventError::UnknownPlayer(_))));
        assert_eq!(s.registry().event_failures(), 0);
    }

    #[test]
    fn missing_payload_defaults_to_null() {
        let mut s = session();
        assert_eq!(
            s.ingest(br#"{"type": "UNKNOWN"}"#).unwrap(),
            IngestOutcome::Applied(EventKind::Unknown)
        );
    }

    #[test]
    #[traced_test]
    fn start_uses_tracing_announcer() {
        let mut s = MatchSession::start(START.as_bytes(), &RulesConfig::default()).unwrap();
        s.ingest(br#"{"type": "MATCH_END", "payload": {"winningTeamID": "fpx"}}"#)
            .unwrap();
        assert!(logs_contain("Red Team has won!"));
    }

    #[test]
    fn report_snapshots_the_match() {
        let mut s = session();
        let events: [&[u8]; 5] = [
            br#"{"type": "PLAYER_KILL", "payload": {"killerID": "fpx-3", "assistants": ["fpx-2"], "assistGold": 150, "goldGranted": 400, "victimID": "g2-2"}}"#,
            br#"{"type": "DRAGON_KILL", "payload": {"killerID": "fpx-2", "dragonType": "air", "goldGranted": 25}}"#,
            br#"{"type": "TURRET_DESTROY", "payload": {"killerID": "g2-4", "turretTier": 1, "turretLane": "mid", "playerGoldGranted": 160, "teamGoldGranted": 50}}"#,
            br#"{"type": "MATCH_END", "payload": {"winningTeamID": "fpx"}}"#,
            b"garbage",
        ];
        for raw in events {
            s.ingest(raw).unwrap();
        }

        let report = s.report();
        assert_eq!(report.match_id.as_str(), "m-7");
        assert_eq!(report.title, "Semi-final");
        assert_eq!(report.winner.as_deref(), Some("Red"));
        assert_eq!(report.event_failures, 1);
        assert_eq!(report.events_applied[&EventKind::PlayerKill], 1);
        assert_eq!(report.events_applied[&EventKind::NashorKill], 0);

        assert_eq!(report.teams.len(), 2);
        let (blue, red) = (&report.teams[0], &report.teams[1]);
        assert_eq!(blue.towers_destroyed(), 1);
        assert_eq!(blue.turrets[0].tier, 1);
        assert_eq!(blue.players[3].gold, 660);
        assert_eq!(red.dragon_kills(), 1);
        assert_eq!(red.players[2].gold, 925);
        assert_eq!(red.players[1].gold, 675);

        let top = report.top_killer.unwrap();
        assert_eq!(top.name, "Doinb");
        assert_eq!(top.kills, 1);
        assert_eq!(
            s.announcer().lines(),
            vec![
                "First blood: Doinb",
                "Red Team has slain the dragon!",
                "Blue Team has destroyed a tier 1 mid turret.",
                "Red Team has won!",
            ]
        );
    }
}
