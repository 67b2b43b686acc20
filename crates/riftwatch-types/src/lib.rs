//! Shared type definitions for the Riftwatch match telemetry core.
//!
//! This crate is the single source of truth for everything that crosses a
//! boundary: the wire payloads the feed delivers, the enumerations named on
//! the wire, and the report structs handed to consumers. Enumerations and
//! report structs flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for match, team and player IDs
//! - [`enums`] -- Turret lanes, dragon types and event kind tags
//! - [`payloads`] -- Match-start document, event envelope, per-kind bodies
//! - [`report`] -- Serializable match summaries

pub mod enums;
pub mod ids;
pub mod payloads;
pub mod report;

// Re-export all public types at crate root for convenience.
pub use enums::{DragonType, EventKind, TurretLane, UnknownVariant};
pub use ids::{MatchId, PlayerId, TeamId};
pub use payloads::{
    DragonKill, FixturePayload, MatchEnd, MatchStart, MatchStartPayload, MinionKill, NashorKill,
    PlayerKill, PlayerRevive, RawEvent, RosterPlayer, TeamRoster, TurretDestroy,
};
pub use report::{MatchReport, PlayerReport, TeamReport, TurretReport};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. The files are written to the `bindings/`
        // directory relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::MatchId::export_all();
        let _ = crate::ids::TeamId::export_all();
        let _ = crate::ids::PlayerId::export_all();

        // Enums
        let _ = crate::enums::TurretLane::export_all();
        let _ = crate::enums::DragonType::export_all();
        let _ = crate::enums::EventKind::export_all();

        // Reports
        let _ = crate::report::MatchReport::export_all();
        let _ = crate::report::TeamReport::export_all();
        let _ = crate::report::TurretReport::export_all();
        let _ = crate::report::PlayerReport::export_all();
    }
}
