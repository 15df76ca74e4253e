//! Error definitions.
//!
//! The trackers themselves never fail: malformed snapshot fields coerce to
//! zero or to a placeholder and the affected slot is skipped. Errors only
//! exist at the parsing boundary, where raw text enters the library:
//! 1. **Snapshot Errors:** Text that is not a JSON object at all.
//! 2. **Configuration Errors:** Config files that do not deserialize or fail validation.

use thiserror::Error;

/// Failure to turn raw text into a [`Snapshot`](crate::snapshot::Snapshot).
///
/// Only structural problems are reported here. Missing or mistyped fields
/// inside a well-formed object are never an error.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The payload is not valid JSON.
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is valid JSON but its top level is not an object.
    #[error("snapshot must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Failure to load or validate a [`Config`](crate::config::Config).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration text failed to deserialize.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A bounded metrics history must keep at least one point.
    #[error("metrics.capacity must be at least 1")]
    ZeroCapacity,

    /// A placeholder string was configured as empty.
    #[error("history.{0} placeholder must not be empty")]
    EmptyPlaceholder(&'static str),
}
