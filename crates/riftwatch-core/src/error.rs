//! Error types for the riftwatch-core crate.
//!
//! Three families, matching the three boundaries of the core:
//!
//! - [`SetupError`] -- the match-start document cannot produce a registry.
//!   Fatal: no session exists.
//! - [`DecodeError`] -- a raw event payload is malformed. Absorbed and
//!   tallied by the ingestion adapter, never surfaced to its caller.
//! - [`EventError`] -- a decoded event cannot be applied (bad tag, dangling
//!   reference, bad enum name). Surfaced to the caller; state committed by
//!   earlier events is untouched.

use riftwatch_types::{EventKind, PlayerId, TeamId, UnknownVariant};

/// Errors raised while building a match registry.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The rosters do not describe exactly two teams of five with unique IDs.
    #[error("malformed roster: {reason}")]
    MalformedRoster {
        /// Description of the violated roster rule.
        reason: String,
    },

    /// The fixture start time is not `YYYY-MM-DDTHH:MM:SSZ`.
    #[error("invalid fixture start time {value:?}: {source}")]
    InvalidStartTime {
        /// The raw start time string.
        value: String,
        /// The underlying parse error.
        source: chrono::ParseError,
    },

    /// The match-start document is not valid JSON of the expected shape.
    #[error("failed to decode match start: {source}")]
    Decode {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// A raw event payload could not be decoded into an event envelope.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload is not JSON, or lacks the `{type, payload}` envelope.
    #[error("malformed event JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// A custom decoder rejected the payload.
    #[error("undecodable event: {message}")]
    Other {
        /// Description of the decode failure.
        message: String,
    },
}

/// Errors raised while applying a decoded event.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The `type` tag is not a recognized event kind.
    #[error("event type is not valid: {tag}")]
    InvalidEventType {
        /// The offending tag.
        tag: String,
    },

    /// No player in either roster has this ID.
    #[error("player with ID {0} can not be found")]
    UnknownPlayer(PlayerId),

    /// Neither team has this ID.
    #[error("team with ID {0} can not be found")]
    UnknownTeam(TeamId),

    /// A lane or dragon-type name did not resolve.
    #[error("invalid enum value: {source}")]
    InvalidEnumValue {
        /// The resolution failure.
        #[from]
        source: UnknownVariant,
    },

    /// The event body does not match the shape its kind requires.
    #[error("malformed {kind} payload: {source}")]
    MalformedPayload {
        /// The event kind whose body failed to decode.
        kind: EventKind,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A second `MATCH_END` arrived under the reject winner policy.
    #[error("match already decided: {winner} Team won")]
    AlreadyDecided {
        /// Display name of the recorded winner.
        winner: &'static str,
    },
}
