//! Trace loading and replay.
//!
//! A trace is a JSON-lines file, one snapshot object per line. Blank lines
//! are ignored and a line that is not a snapshot is logged and skipped, so a
//! truncated or partially corrupted recording still replays.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use pipeview_core::{Config, Session, Snapshot};
use tracing::{info, warn};

use crate::error::CliError;

/// Line counts of one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Snapshots fed to the session.
    pub observed: usize,
    /// Non-blank lines that did not parse.
    pub skipped: usize,
}

/// Loads the configuration file, if any, and applies the capacity override.
pub fn load_config(path: Option<&Path>, capacity: Option<usize>) -> Result<Config, CliError> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Config::from_json(&text)?
        }
        None => Config::default(),
    };
    if let Some(capacity) = capacity {
        config.metrics.capacity = capacity;
    }
    config.validate()?;
    Ok(config)
}

/// Feeds every snapshot of `reader` to `session`.
pub fn replay<R: BufRead>(reader: R, session: &mut Session) -> io::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        match Snapshot::from_json(text) {
            Ok(snapshot) => {
                let _ = session.observe(&snapshot);
                summary.observed += 1;
            }
            Err(err) => {
                warn!(line = index + 1, error = %err, "skipping malformed snapshot");
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}

/// Opens `path` and replays it into `session`.
pub fn replay_file(path: &Path, session: &mut Session) -> Result<ReplaySummary, CliError> {
    let read_error = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_error)?;
    let summary = replay(BufReader::new(file), session).map_err(read_error)?;
    info!(
        trace = %path.display(),
        observed = summary.observed,
        skipped = summary.skipped,
        cycle = session.history().cycle_count(),
        "replay finished"
    );
    Ok(summary)
}
