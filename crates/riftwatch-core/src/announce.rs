//! Match announcements and the sinks that receive them.
//!
//! Handlers never log directly. They hand an [`Announcement`] to the
//! [`Announcer`] injected into the session, which decides where the line
//! goes: the tracing subscriber ([`TracingAnnouncer`]), memory
//! ([`RecordingAnnouncer`]) or nowhere ([`SilentAnnouncer`]).

use core::fmt;

use tracing::info;

use crate::entity::{Dragon, TeamSide, Turret};

/// A notable in-match occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    /// The first attributed kill of the match.
    FirstBlood {
        /// Display name of the killer.
        player: String,
    },
    /// A team slew Baron Nashor.
    NashorSlain {
        /// The slaying team.
        team: TeamSide,
    },
    /// A team slew an elemental dragon.
    DragonSlain {
        /// The slaying team.
        team: TeamSide,
        /// The dragon slain.
        dragon: Dragon,
    },
    /// A team destroyed a turret.
    TurretDestroyed {
        /// The destroying team.
        team: TeamSide,
        /// The turret destroyed.
        turret: Turret,
    },
    /// A team won the match.
    MatchWon {
        /// The winning team.
        team: TeamSide,
    },
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstBlood { player } => write!(f, "First blood: {player}"),
            Self::NashorSlain { team } => write!(f, "{team} Team has slain the Nashor!"),
            Self::DragonSlain { team, .. } => write!(f, "{team} Team has slain the dragon!"),
            Self::TurretDestroyed { team, turret } => {
                write!(f, "{team} Team has destroyed a {turret}.")
            }
            Self::MatchWon { team } => write!(f, "{team} Team has won!"),
        }
    }
}

/// A sink for match announcements.
pub trait Announcer {
    /// Called once per announcement, after the event's mutations are applied.
    fn announce(&mut self, announcement: Announcement);
}

/// Logs each announcement at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnnouncer;

impl Announcer for TracingAnnouncer {
    fn announce(&mut self, announcement: Announcement) {
        info!("{announcement}");
    }
}

/// Keeps announcements in memory, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingAnnouncer {
    announcements: Vec<Announcement>,
}

impl RecordingAnnouncer {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self {
            announcements: Vec::new(),
        }
    }

    /// Everything announced so far.
    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    /// The announcements rendered as text lines.
    pub fn lines(&self) -> Vec<String> {
        self.announcements.iter().map(ToString::to_string).collect()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&mut self, announcement: Announcement) {
        self.announcements.push(announcement);
    }
}

/// Discards every announcement.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&mut self, _announcement: Announcement) {}
}
