//! Human-readable rendering of a [`MatchReport`].

use core::fmt;

use riftwatch_core::ReplayMode;
use riftwatch_types::MatchReport;

/// A report rendered for the terminal, focused on what `mode` replays.
pub struct Summary<'a> {
    report: &'a MatchReport,
    mode: ReplayMode,
}

impl<'a> Summary<'a> {
    /// Wrap a report for display.
    pub const fn new(report: &'a MatchReport, mode: ReplayMode) -> Self {
        Self { report, mode }
    }

    fn write_minions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Players who killed minions:")?;
        for player in self.report.teams.iter().flat_map(|team| &team.players) {
            if player.minions > 0 {
                writeln!(
                    f,
                    "  {} -- killed minions: {} -- gold: {}",
                    player.name, player.minions, player.gold
                )?;
            }
        }
        Ok(())
    }

    fn write_dragons(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for team in &self.report.teams {
            if team.dragons.is_empty() {
                continue;
            }
            let dragons: Vec<&str> = team.dragons.iter().map(|d| d.as_str()).collect();
            writeln!(f, "{} Team dragons: {}", team.name, dragons.join(", "))?;
        }
        Ok(())
    }

    fn write_full(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(f, "{} ({})", report.title, report.match_id)?;
        writeln!(f, "Started: {}", report.start_time.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(f, "Winner: {}", report.winner.as_deref().unwrap_or("undecided"))?;
        writeln!(f, "Broken events: {}", report.event_failures)?;

        writeln!(f, "Events applied:")?;
        for (kind, count) in &report.events_applied {
            writeln!(f, "  {:<15} {count}", kind.as_str())?;
        }

        for team in &report.teams {
            writeln!(
                f,
                "{} Team ({}): {} towers, {} dragons, {} nashors",
                team.name,
                team.team_id,
                team.towers_destroyed(),
                team.dragon_kills(),
                team.nashor_kills
            )?;
            for p in &team.players {
                writeln!(
                    f,
                    "  {:<16} {:>3}/{}/{:<3} cs {:<4} gold {:<6}{}",
                    p.name,
                    p.kills,
                    p.deaths,
                    p.assists,
                    p.minions,
                    p.gold,
                    if p.alive { "" } else { " (dead)" }
                )?;
            }
        }

        if let Some(top) = &report.top_killer {
            writeln!(f, "Top killer: {} with {} kills", top.name, top.kills)?;
        }
        Ok(())
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            ReplayMode::All => self.write_full(f),
            ReplayMode::Minions => self.write_minions(f),
            ReplayMode::Dragons => self.write_dragons(f),
        }
    }
}
