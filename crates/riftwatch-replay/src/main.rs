//! Replay binary for Riftwatch.
//!
//! Feeds a directory of recorded events, one JSON event per file, through
//! a match session and prints the resulting match report.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line flags
//! 2. Load configuration from `riftwatch-config.yaml` and apply flag overrides
//! 3. Initialize structured logging (tracing)
//! 4. Build the match session from the match-start document
//! 5. Spawn the file reader, which feeds a bounded queue
//! 6. Apply queued events one at a time, in queue order
//! 7. Print the report

mod error;
mod source;
mod summary;

use std::path::{Path, PathBuf};

use clap::Parser;
use riftwatch_core::config::LoggingConfig;
use riftwatch_core::{IngestOutcome, MatchSession, ReplayMode, RiftwatchConfig};
use riftwatch_types::MatchReport;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ReplayError;
use crate::source::{EventFile, Placement};
use crate::summary::Summary;

/// Replay recorded match events and summarise the match.
#[derive(Debug, Parser)]
#[command(name = "riftwatch-replay", version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "riftwatch-config.yaml")]
    config: PathBuf,

    /// Which events to replay: all, minions or dragons
    #[arg(long, visible_alias = "test")]
    mode: Option<ReplayMode>,

    /// Match-start document to build the session from
    #[arg(long)]
    match_start: Option<PathBuf>,

    /// Directory holding one JSON event per file
    #[arg(long)]
    events_dir: Option<PathBuf>,

    /// Seed for the minion sample
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Flags win over the config file and environment.
    fn apply(&self, config: &mut RiftwatchConfig) {
        let replay = &mut config.replay;
        if let Some(mode) = self.mode {
            replay.mode = mode;
        }
        if let Some(path) = &self.match_start {
            replay.match_start.clone_from(path);
        }
        if let Some(dir) = &self.events_dir {
            replay.events_dir.clone_from(dir);
        }
        if let Some(seed) = self.seed {
            replay.seed = seed;
        }
    }
}

/// Application entry point for the replay tool.
///
/// # Errors
///
/// Returns an error if configuration, match setup, or the events
/// directory cannot be loaded. Individual event failures are logged and do
/// not stop the replay.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    cli.apply(&mut config);

    init_logging(&config.logging);
    if !cli.config.exists() {
        info!(path = %cli.config.display(), "Config file not found, using defaults");
    }
    info!(
        mode = %config.replay.mode,
        match_start = %config.replay.match_start.display(),
        events_dir = %config.replay.events_dir.display(),
        starting_gold = config.rules.starting_gold,
        "riftwatch-replay starting"
    );

    let report = replay(&config).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report).map_err(ReplayError::from)?);
    } else {
        print!("{}", Summary::new(&report, config.replay.mode));
    }
    Ok(())
}

/// Load the configuration file, falling back to defaults when it is absent.
fn load_config(path: &Path) -> Result<RiftwatchConfig, ReplayError> {
    if path.exists() {
        Ok(RiftwatchConfig::from_file(path)?)
    } else {
        Ok(RiftwatchConfig::parse("")?)
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Run one replay end to end and return the final report.
async fn replay(config: &RiftwatchConfig) -> Result<MatchReport, ReplayError> {
    let settings = &config.replay;

    let raw_start = tokio::fs::read(&settings.match_start)
        .await
        .map_err(|source| ReplayError::Io {
            path: settings.match_start.clone(),
            source,
        })?;
    let mut session = MatchSession::start(&raw_start, &config.rules)?;
    info!(
        match_id = %session.registry().id(),
        title = %session.registry().fixture().title,
        "Match session started"
    );

    let files = source::sample(
        source::list_event_files(&settings.events_dir).await?,
        settings.mode,
        settings.sample_size,
        settings.seed,
    );
    info!(file_count = files.len(), "Replaying event files");

    let (tx, mut rx) = mpsc::channel(settings.queue_capacity.max(1));
    let reader = tokio::spawn(read_events(files, settings.mode, tx));

    while let Some(file) = rx.recv().await {
        apply(&mut session, &file);
    }
    reader.await?;

    let report = session.report();
    info!(
        event_failures = report.event_failures,
        winner = report.winner.as_deref().unwrap_or("undecided"),
        "Replay complete"
    );
    Ok(report)
}

/// Read event files in order and queue them according to `mode`.
///
/// Files held back by [`Placement::Last`] are queued after all others.
/// Unreadable files are logged and skipped.
async fn read_events(files: Vec<PathBuf>, mode: ReplayMode, tx: mpsc::Sender<EventFile>) {
    let mut deferred = Vec::new();

    for path in files {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(file = %name, error = %e, "Skipping unreadable event file");
                continue;
            }
        };

        let file = EventFile { name, raw };
        match source::placement(mode, &file.raw) {
            Placement::Now => {
                if tx.send(file).await.is_err() {
                    return;
                }
            }
            Placement::Last => deferred.push(file),
            Placement::Skip => debug!(file = %file.name, "Skipping event file for this mode"),
        }
    }

    for file in deferred {
        if tx.send(file).await.is_err() {
            return;
        }
    }
}

/// Apply one file to the session, logging any failure against its name.
fn apply(session: &mut MatchSession, file: &EventFile) {
    match session.ingest(&file.raw) {
        Ok(IngestOutcome::Applied(kind)) => debug!(file = %file.name, kind = %kind, "Event applied"),
        Ok(IngestOutcome::Rejected) => warn!(file = %file.name, "Event file could not be decoded"),
        Err(e) => warn!(file = %file.name, error = %e, "Event rejected"),
    }
}
