//! Debugging session state.
//!
//! A [`Session`] owns one instance of each tracker for the lifetime of a
//! debugging session and feeds every snapshot to all of them. The trackers
//! never read each other's state; the session only fans the snapshot out.

use tracing::debug;

use crate::config::Config;
use crate::history::HistoryEngine;
use crate::metrics::MetricsRecorder;
use crate::projector::{ForwardingPaths, Highlights, PipelineDiagram, SnapshotProjector};
use crate::snapshot::{Snapshot, VmSummary};
use crate::status::StatusLine;

/// Trackers and projector of one debugging session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    history: HistoryEngine,
    metrics: MetricsRecorder,
    projector: SnapshotProjector,
    last: Option<Snapshot>,
}

impl Session {
    /// Creates a session with fresh trackers configured by `config`.
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            HistoryEngine::new(&config.history),
            MetricsRecorder::new(&config.metrics),
            SnapshotProjector::new(config.history.latch_naming),
        )
    }

    /// Assembles a session from already constructed components.
    pub const fn from_parts(
        history: HistoryEngine,
        metrics: MetricsRecorder,
        projector: SnapshotProjector,
    ) -> Self {
        Self {
            history,
            metrics,
            projector,
            last: None,
        }
    }

    /// Feeds one snapshot to every tracker and returns this cycle's highlights.
    pub fn observe(&mut self, snapshot: &Snapshot) -> Highlights {
        self.history.update(snapshot);
        self.metrics.update(&snapshot.vm);
        self.last = Some(snapshot.clone());
        self.projector.project(snapshot)
    }

    /// Clears every tracker, as when the debuggee restarts.
    pub fn reset(&mut self) {
        debug!("session reset");
        self.history.reset();
        self.metrics.reset();
        self.last = None;
    }

    /// Instruction timelines.
    #[inline]
    pub const fn history(&self) -> &HistoryEngine {
        &self.history
    }

    /// Performance time series.
    #[inline]
    pub const fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Stateless projector.
    #[inline]
    pub const fn projector(&self) -> &SnapshotProjector {
        &self.projector
    }

    /// Most recently observed snapshot.
    #[inline]
    pub const fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last.as_ref()
    }

    /// Highlights of the most recent snapshot.
    pub fn highlights(&self) -> Highlights {
        self.last
            .as_ref()
            .map(|snapshot| self.projector.project(snapshot))
            .unwrap_or_default()
    }

    /// Pipeline diagram of the most recent snapshot.
    pub fn diagram(&self) -> PipelineDiagram {
        self.last.as_ref().map_or_else(
            || PipelineDiagram::from_snapshot(&Snapshot::default()),
            PipelineDiagram::from_snapshot,
        )
    }

    /// Forwarding paths of the most recent snapshot.
    pub fn forwarding(&self) -> ForwardingPaths {
        self.last
            .as_ref()
            .map(ForwardingPaths::from_snapshot)
            .unwrap_or_default()
    }

    /// Status summary of the most recent snapshot.
    pub fn status(&self) -> StatusLine {
        self.last.as_ref().map_or_else(
            || StatusLine::from_vm(&VmSummary::default()),
            |snapshot| StatusLine::from_vm(&snapshot.vm),
        )
    }
}
