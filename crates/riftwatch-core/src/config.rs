//! Configuration loading and typed config structures for Riftwatch.
//!
//! The canonical configuration lives in `riftwatch-config.yaml` next to the
//! replay binary's working directory. Every field has a default, so an
//! empty or missing file yields a working setup.

use core::fmt;
use core::str::FromStr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::entity::STARTING_GOLD;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `riftwatch-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RiftwatchConfig {
    /// Match rules applied by the core.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Replay tool settings.
    #[serde(default)]
    pub replay: ReplayConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RiftwatchConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for replay inputs:
    /// - `RIFTWATCH_MATCH_START` overrides `replay.match_start`
    /// - `RIFTWATCH_EVENTS_DIR` overrides `replay.events_dir`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.replay.apply_env_overrides();
        Ok(config)
    }
}

/// Match rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    /// Gold every player holds at match start.
    #[serde(default = "default_starting_gold")]
    pub starting_gold: u32,

    /// What a second `MATCH_END` does.
    #[serde(default)]
    pub winner_policy: WinnerPolicy,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_gold: default_starting_gold(),
            winner_policy: WinnerPolicy::default(),
        }
    }
}

/// How the registry treats a winner that is already recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinnerPolicy {
    /// The latest `MATCH_END` overwrites the winner; the overwrite is logged.
    #[default]
    LastWriteWins,
    /// A second `MATCH_END` fails and the first winner stands.
    Reject,
}

/// Which events the replay tool feeds to the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayMode {
    /// Every event file; `MATCH_END` files are deferred to the end.
    #[default]
    All,
    /// A seeded random sample of files, keeping only minion kills.
    Minions,
    /// Only dragon kills.
    Dragons,
}

impl ReplayMode {
    /// The configuration name of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Minions => "minions",
            Self::Dragons => "dragons",
        }
    }
}

impl FromStr for ReplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "minions" => Ok(Self::Minions),
            "dragons" => Ok(Self::Dragons),
            other => Err(format!(
                "unknown replay mode {other:?} (expected all, minions or dragons)"
            )),
        }
    }
}

impl fmt::Display for ReplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replay tool settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplayConfig {
    /// Path of the match-start document.
    #[serde(default = "default_match_start")]
    pub match_start: PathBuf,

    /// Directory holding one JSON event per file.
    #[serde(default = "default_events_dir")]
    pub events_dir: PathBuf,

    /// Which events to replay.
    #[serde(default)]
    pub mode: ReplayMode,

    /// Number of files drawn in `minions` mode.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Seed for the `minions` sample.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Capacity of the queue between the file reader and the consumer.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl ReplayConfig {
    /// Override replay inputs with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("RIFTWATCH_MATCH_START") {
            self.match_start = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("RIFTWATCH_EVENTS_DIR") {
            self.events_dir = PathBuf::from(val);
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            match_start: default_match_start(),
            events_dir: default_events_dir(),
            mode: ReplayMode::default(),
            sample_size: default_sample_size(),
            seed: default_seed(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_starting_gold() -> u32 {
    STARTING_GOLD
}

fn default_match_start() -> PathBuf {
    PathBuf::from("samples/match_start.json")
}

fn default_events_dir() -> PathBuf {
    PathBuf::from("data")
}

const fn default_sample_size() -> usize {
    10
}

const fn default_seed() -> u64 {
    42
}

const fn default_queue_capacity() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_owned()
}
