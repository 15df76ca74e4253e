//! Sparse per-instruction stage timeline.
//!
//! A timeline maps 1-based cycles to stage labels. Only labelled cycles are
//! stored, so a row first seen late in a session, or at an absurd cycle
//! number, costs one entry per label. The only ways to change a timeline are
//! writing the label of one cycle and truncating to a cycle horizon: after
//! `truncate(c)` nothing is recorded past cycle `c`.

use std::collections::BTreeMap;

use serde::Serialize;

use super::stage::Stage;

/// Stage labels of one instruction, keyed by 1-based cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StageTimeline {
    labels: BTreeMap<u64, Stage>,
}

impl StageTimeline {
    /// Creates an empty timeline.
    pub const fn new() -> Self {
        Self {
            labels: BTreeMap::new(),
        }
    }

    /// Builds a timeline from per-cycle labels, starting at cycle 1.
    pub fn from_slots(slots: impl IntoIterator<Item = Option<Stage>>) -> Self {
        Self {
            labels: slots
                .into_iter()
                .zip(1u64..)
                .filter_map(|(slot, cycle)| slot.map(|stage| (cycle, stage)))
                .collect(),
        }
    }

    /// Last labelled cycle, or 0 for an empty timeline.
    #[inline]
    pub fn len(&self) -> u64 {
        self.last_cycle().unwrap_or(0)
    }

    /// Returns true if no cycle carries a label.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label recorded for `cycle`, if any. Cycle 0 never has a label.
    pub fn get(&self, cycle: u64) -> Option<Stage> {
        self.labels.get(&cycle).copied()
    }

    /// Records `stage` for `cycle`. Writes to cycle 0 are ignored.
    pub fn set(&mut self, cycle: u64, stage: Stage) {
        if cycle > 0 {
            let _ = self.labels.insert(cycle, stage);
        }
    }

    /// Drops every label after `horizon`, keeping cycles `1..=horizon`.
    pub fn truncate(&mut self, horizon: u64) {
        self.labels.retain(|&cycle, _| cycle <= horizon);
    }

    /// Iterates `(cycle, stage)` for every labelled cycle, in cycle order.
    pub fn labelled(&self) -> impl Iterator<Item = (u64, Stage)> + '_ {
        self.labels.iter().map(|(&cycle, &stage)| (cycle, stage))
    }

    /// First labelled cycle, if any.
    pub fn first_cycle(&self) -> Option<u64> {
        self.labels.keys().next().copied()
    }

    /// Last labelled cycle, if any.
    pub fn last_cycle(&self) -> Option<u64> {
        self.labels.keys().next_back().copied()
    }
}
