//! Replays the sample match shipped with the repository through a session
//! and checks the resulting state end to end.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use riftwatch_core::{
    EventError, IngestOutcome, MatchSession, RecordingAnnouncer, RulesConfig, Team, TeamSide,
    WinnerPolicy,
};
use riftwatch_core::{JsonEventDecoder, Match};
use riftwatch_types::EventKind;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn session(rules: &RulesConfig) -> MatchSession<RecordingAnnouncer> {
    let raw = std::fs::read(repo_root().join("samples").join("match_start.json")).unwrap();
    let registry = Match::from_json(&raw, rules.starting_gold).unwrap();
    MatchSession::with_parts(registry, rules, RecordingAnnouncer::new(), JsonEventDecoder)
}

/// Sample event files in name order, with `MATCH_END` files moved last.
fn sample_events() -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<_> = std::fs::read_dir(repo_root().join("data"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let (ends, mut events): (Vec<_>, Vec<_>) = files
        .into_iter()
        .map(|path| {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            (name, std::fs::read(&path).unwrap())
        })
        .partition(|(_, raw)| String::from_utf8_lossy(raw).contains("MATCH_END"));
    events.extend(ends);
    events
}

fn gold_of(team: &Team) -> Vec<u32> {
    team.players().iter().map(|p| p.gold()).collect()
}

#[test]
fn sample_match_replays_to_expected_state() {
    let mut s = session(&RulesConfig::default());
    let mut rejected_events = Vec::new();
    for (name, raw) in sample_events() {
        if let Err(e) = s.ingest(&raw) {
            rejected_events.push((name, e));
        }
    }

    assert_eq!(rejected_events.len(), 1);
    assert_eq!(rejected_events[0].0, "016.json");
    assert!(matches!(rejected_events[0].1, EventError::InvalidEnumValue { .. }));

    let registry = s.registry();
    assert_eq!(registry.event_failures(), 1);
    assert_eq!(registry.winning_team().map(Team::name), Some("Red"));

    let dispatcher = s.dispatcher();
    assert_eq!(dispatcher.count(EventKind::PlayerKill), 3);
    assert_eq!(dispatcher.count(EventKind::MinionKill), 3);
    assert_eq!(dispatcher.count(EventKind::DragonKill), 2);
    assert_eq!(dispatcher.count(EventKind::Unknown), 1);
    assert_eq!(dispatcher.count(EventKind::MatchStart), 0);

    let blue = registry.team(TeamSide::Blue);
    let red = registry.team(TeamSide::Red);
    assert_eq!(blue.towers_destroyed(), 1);
    assert_eq!(red.towers_destroyed(), 1);
    assert_eq!(red.dragon_kills(), 2);
    assert_eq!(red.nashor_kills(), 1);
    assert_eq!(gold_of(blue), vec![750, 700, 971, 550, 550]);
    assert_eq!(gold_of(red), vec![1250, 1100, 1271, 971, 1100]);

    let alive: Vec<bool> = blue.players().iter().map(|p| p.is_alive()).collect();
    assert_eq!(alive, vec![false, true, true, false, true]);

    assert_eq!(registry.top_killer().map(|p| p.name()), Some("G2 caPs"));
    assert_eq!(
        s.announcer().lines(),
        vec![
            "First blood: G2 caPs",
            "Red Team has slain the dragon!",
            "Blue Team has destroyed a tier 1 top turret.",
            "Red Team has slain the dragon!",
            "Red Team has destroyed a tier 1 bot turret.",
            "Red Team has slain the Nashor!",
            "Red Team has won!",
        ]
    );
}

#[test]
fn gold_never_decreases() {
    let mut s = session(&RulesConfig::default());
    let mut previous: Vec<u32> = s.registry().teams().flat_map(gold_of).collect();

    for (_, raw) in sample_events() {
        let _ = s.ingest(&raw);
        let current: Vec<u32> = s.registry().teams().flat_map(gold_of).collect();
        assert!(previous.iter().zip(&current).all(|(before, after)| after >= before));
        previous = current;
    }
}

#[test]
fn failing_event_leaves_state_untouched() {
    let mut s = session(&RulesConfig::default());
    let before = s.registry().clone();
    let counters_before = s.dispatcher().clone();

    let result = s.ingest(
        br#"{"type": "PLAYER_KILL", "payload": {"killerID": "g2-mid", "assistants": ["g2-jng", "ghost"], "assistGold": 150, "goldGranted": 400, "victimID": "fpx-mid"}}"#,
    );

    assert!(matches!(result, Err(EventError::UnknownPlayer(_))));
    assert_eq!(s.registry(), &before);
    assert_eq!(s.dispatcher(), &counters_before);
    assert!(s.announcer().announcements().is_empty());
}

#[test]
fn malformed_input_never_reaches_the_caller() {
    let mut s = session(&RulesConfig::default());
    let inputs: [&[u8]; 4] = [b"", b"null", br#"{"type": 7}"#, b"\xff\xfe"];
    for raw in inputs {
        assert_eq!(s.ingest(raw).unwrap(), IngestOutcome::Rejected);
    }
    assert_eq!(s.registry().event_failures(), 4);
}

#[test]
fn reject_policy_keeps_the_first_winner() {
    let rules = RulesConfig {
        winner_policy: WinnerPolicy::Reject,
        ..RulesConfig::default()
    };
    let mut s = session(&rules);
    s.ingest(br#"{"type": "MATCH_END", "payload": {"winningTeamID": "g2"}}"#)
        .unwrap();
    let second = s.ingest(br#"{"type": "MATCH_END", "payload": {"winningTeamID": "fpx"}}"#);

    assert!(matches!(second, Err(EventError::AlreadyDecided { .. })));
    assert_eq!(s.registry().winning_team().map(Team::name), Some("Blue"));
}

#[test]
fn report_serializes_counters_by_wire_tag() {
    let mut s = session(&RulesConfig {
        starting_gold: 0,
        ..RulesConfig::default()
    });
    s.ingest(br#"{"type": "MINION_KILL", "payload": {"playerID": "fpx-bot", "goldGranted": 19}}"#)
        .unwrap();

    let json = serde_json::to_value(s.report()).unwrap();
    assert_eq!(json["events_applied"]["MINION_KILL"], 1);
    assert_eq!(json["events_applied"]["DRAGON_KILL"], 0);
    assert_eq!(json["teams"][1]["players"][3]["gold"], 19);
    assert_eq!(json["winner"], serde_json::Value::Null);
}
