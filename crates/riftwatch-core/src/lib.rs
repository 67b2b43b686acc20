//! Match state and event processing for Riftwatch.
//!
//! This crate turns a stream of raw telemetry payloads from one
//! professional match into authoritative match state: who is alive, how
//! much gold each player holds, which objectives each team has taken and
//! who won.
//!
//! # Modules
//!
//! - [`entity`] -- Players, teams, turrets, dragons and the fixture.
//! - [`registry`] -- The [`Match`] registry and ID resolution.
//! - [`dispatcher`] -- Routing table, per-kind counters and the handlers.
//! - [`ingest`] -- [`MatchSession`]: decoding, failure tallying, dispatch.
//! - [`announce`] -- [`Announcer`] sinks for in-match notifications.
//! - [`report`] -- Snapshotting a match into a report.
//! - [`config`] -- Configuration loading from `riftwatch-config.yaml`.
//! - [`error`] -- Setup, decode and event error types.
//!
//! [`Match`]: registry::Match
//! [`MatchSession`]: ingest::MatchSession
//! [`Announcer`]: announce::Announcer

pub mod announce;
pub mod config;
pub mod dispatcher;
pub mod entity;
pub mod error;
pub mod ingest;
pub mod registry;
pub mod report;

pub use announce::{Announcement, Announcer, RecordingAnnouncer, SilentAnnouncer, TracingAnnouncer};
pub use config::{ConfigError, ReplayMode, RiftwatchConfig, RulesConfig, WinnerPolicy};
pub use dispatcher::EventDispatcher;
pub use entity::{Dragon, Fixture, Player, PlayerHandle, Team, TeamSide, Turret};
pub use error::{DecodeError, EventError, SetupError};
pub use ingest::{EventDecoder, IngestOutcome, JsonEventDecoder, MatchSession};
pub use registry::Match;
