//! Pipeline visualization core.
//!
//! This crate turns the per-cycle pipeline snapshots of a 5-stage processor
//! debugger into editor-ready views:
//! 1. **History:** Per-instruction stage timelines that survive rewinds and infer flushes.
//! 2. **Metrics:** A bounded, rewind-tolerant `(cycle, CPI, stalls)` time series.
//! 3. **Projector:** Source-line highlights, the pipeline diagram and forwarding paths of one snapshot.
//! 4. **Session:** One owned instance of each tracker per debugging session.
//! 5. **Rendering:** Status line and fixed-width text tables.

/// Shared constants and error types.
pub mod common;
/// Tracker configuration (defaults, history and metrics sections).
pub mod config;
/// History reconstruction engine (timelines, stage labels, flush inference).
pub mod history;
/// Bounded performance time series.
pub mod metrics;
/// Stateless projections of a single snapshot.
pub mod projector;
/// Plain-text views of tracker state.
pub mod render;
/// Session-owned aggregate of the trackers.
pub mod session;
/// Debugger snapshot schema and lenient parsing.
pub mod snapshot;
/// Status bar summary.
pub mod status;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Per-instruction timeline tracker.
pub use crate::history::{GanttRow, HistoryEngine, Stage};
/// Performance time series tracker.
pub use crate::metrics::{MetricPoint, MetricsRecorder};
/// Snapshot projections.
pub use crate::projector::{Highlights, LineRange, SnapshotProjector};
/// Per-session tracker bundle; construct with `Session::new`.
pub use crate::session::Session;
/// One debugger observation; parse with `Snapshot::from_json`.
pub use crate::snapshot::Snapshot;
