//! Common types and constants shared by the trackers and projections.
//!
//! This module provides the fundamental building blocks used across the crate. It includes:
//! 1. **Constants:** Snapshot keys, display placeholders and default limits.
//! 2. **Error Handling:** Error types for the parsing and configuration boundary.

/// Common constants used throughout the crate.
pub mod constants;

/// Error types for snapshot parsing and configuration.
pub mod error;

pub use constants::METRICS_CAPACITY;
pub use error::{ConfigError, SnapshotError};
