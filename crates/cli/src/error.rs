//! CLI error type.

use std::path::PathBuf;

use pipeview_core::common::ConfigError;
use thiserror::Error;

/// Anything that stops a replay before its views are printed.
#[derive(Error, Debug)]
pub enum CliError {
    /// A trace or configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration did not parse or validate.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A view could not be written to stdout.
    #[error("cannot write output: {0}")]
    Write(#[from] std::io::Error),

    /// A view could not be encoded as JSON.
    #[error("cannot encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
