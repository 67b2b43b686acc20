//! Error types for the replay binary.
//!
//! [`ReplayError`] is the top-level error type that wraps every failure
//! that stops a replay. Failures of individual event files are logged and
//! never reach it.

use std::path::PathBuf;

/// Top-level error for the replay binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: riftwatch_core::ConfigError,
    },

    /// The match-start document could not produce a session.
    #[error("match setup failed: {source}")]
    Setup {
        /// The underlying setup error.
        #[from]
        source: riftwatch_core::SetupError,
    },

    /// A required input could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file or directory being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file reader task panicked or was cancelled.
    #[error("event reader task failed: {source}")]
    Reader {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },

    /// The report could not be serialized.
    #[error("failed to serialize report: {source}")]
    Report {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
