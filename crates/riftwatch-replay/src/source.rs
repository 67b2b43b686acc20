//! Event file discovery and per-mode selection.
//!
//! Each file in the events directory holds one raw event. Files are
//! considered in file-name order. Selection looks at raw bytes only; the
//! core decides later whether a file actually decodes.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use riftwatch_core::ReplayMode;
use riftwatch_types::EventKind;

use crate::error::ReplayError;

/// One event file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFile {
    /// File name, used to attribute failures.
    pub name: String,
    /// Raw contents.
    pub raw: Vec<u8>,
}

/// What to do with a file once its contents are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Send it now.
    Now,
    /// Hold it back until every other file has been sent.
    Last,
    /// Do not send it.
    Skip,
}

/// List the `*.json` files of `dir`, sorted by file name.
pub async fn list_event_files(dir: &Path) -> Result<Vec<PathBuf>, ReplayError> {
    let io_error = |source| ReplayError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_error)?;
    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        let path = entry.path();
        let is_file = entry.file_type().await.map_err(io_error)?.is_file();
        if is_file && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Narrow the listing before any file is read.
///
/// `minions` mode draws `sample_size` distinct files with a generator
/// seeded from `seed`, then restores file-name order. Other modes keep
/// every file.
pub fn sample(files: Vec<PathBuf>, mode: ReplayMode, sample_size: usize, seed: u64) -> Vec<PathBuf> {
    if mode != ReplayMode::Minions {
        return files;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked: Vec<PathBuf> = files.choose_multiple(&mut rng, sample_size).cloned().collect();
    picked.sort();
    picked
}

/// Decide where a file goes based on the event tags it mentions.
pub fn placement(mode: ReplayMode, raw: &[u8]) -> Placement {
    match mode {
        ReplayMode::All if has_type(raw, EventKind::MatchEnd) => Placement::Last,
        ReplayMode::All => Placement::Now,
        ReplayMode::Minions if has_type(raw, EventKind::MinionKill) => Placement::Now,
        ReplayMode::Dragons if has_type(raw, EventKind::DragonKill) => Placement::Now,
        ReplayMode::Minions | ReplayMode::Dragons => Placement::Skip,
    }
}

/// Whether the raw bytes mention the tag of `kind` anywhere.
pub fn has_type(raw: &[u8], kind: EventKind) -> bool {
    let tag = kind.as_str().as_bytes();
    raw.windows(tag.len()).any(|window| window == tag)
}
