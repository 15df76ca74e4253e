//! History Reconstruction Engine.
//!
//! Turns a sequence of instantaneous, possibly rewound pipeline snapshots into
//! per-instruction stage timelines. It provides:
//! 1. **Rewind Normalization:** The current cycle is an absolute horizon; anything recorded after it is discarded.
//! 2. **Garbage Collection:** Rows left without any label after truncation are dropped.
//! 3. **Stage Ingestion:** Valid occupants of each pipeline register label the current cycle.
//! 4. **Flush Inference:** An in-flight instruction that vanishes without reaching write-back is marked `FLUSH`.
//!
//! The result after any update equals replaying every snapshot from cycle 1
//! up to the current one, so stepping the debugger backward and forward again
//! yields the same history as never having diverged.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::HistoryConfig;
use crate::snapshot::{LatchNaming, PipelineRegister, PipelineState, Snapshot};

/// Stage label type.
pub mod stage;

/// Sparse per-cycle stage storage.
pub mod timeline;

pub use stage::Stage;
pub use timeline::StageTimeline;

/// Timeline row of one instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GanttRow {
    /// Sequence id of the instruction.
    pub id: u64,
    /// Program counter captured at first sighting.
    pub pc: String,
    /// Disassembly captured at first sighting.
    pub instr: String,
    /// Stage label of every cycle the instruction was observed in.
    pub stages: StageTimeline,
}

impl GanttRow {
    /// Creates a row with an empty timeline.
    pub fn new(id: u64, pc: impl Into<String>, instr: impl Into<String>) -> Self {
        Self {
            id,
            pc: pc.into(),
            instr: instr.into(),
            stages: StageTimeline::new(),
        }
    }
}

/// Per-instruction stage history tracker.
#[derive(Clone, Debug)]
pub struct HistoryEngine {
    /// Rows keyed by sequence id; iteration order is presentation order.
    rows: BTreeMap<u64, GanttRow>,
    /// Cycle of the last processed snapshot; 0 when idle.
    current_cycle: u64,
    naming: LatchNaming,
    unknown_pc: String,
    unknown_instr: String,
}

impl Default for HistoryEngine {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}

impl HistoryEngine {
    /// Creates an empty engine.
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            rows: BTreeMap::new(),
            current_cycle: 0,
            naming: config.latch_naming,
            unknown_pc: config.unknown_pc.clone(),
            unknown_instr: config.unknown_instr.clone(),
        }
    }

    /// Drops every row and returns to cycle 0.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.current_cycle = 0;
    }

    /// Folds one snapshot into the history.
    ///
    /// A snapshot whose cycle is not positive means the simulation is not
    /// running and resets the engine. Slots with malformed or missing
    /// sequence ids are skipped; the update itself never fails.
    pub fn update(&mut self, snapshot: &Snapshot) {
        let Some(cycle) = snapshot.vm.cycle() else {
            if self.current_cycle != 0 || !self.rows.is_empty() {
                debug!(
                    cycle = snapshot.vm.cycle_count,
                    rows = self.rows.len(),
                    "simulation not running, clearing history"
                );
            }
            self.reset();
            return;
        };

        if cycle < self.current_cycle {
            debug!(from = self.current_cycle, to = cycle, "rewind");
        }
        self.current_cycle = cycle;

        self.truncate_to(cycle);
        let touched = self.ingest(&snapshot.pipeline, cycle);
        self.infer_flushes(&touched, cycle);
    }

    /// Discards everything recorded after `cycle` and drops rows that only
    /// existed in the discarded future.
    fn truncate_to(&mut self, cycle: u64) {
        for row in self.rows.values_mut() {
            row.stages.truncate(cycle);
        }
        self.rows.retain(|&id, row| {
            let keep = !row.stages.is_empty();
            if !keep {
                trace!(seq_id = id, cycle, "dropping row erased by rewind");
            }
            keep
        });
    }

    /// Labels the current cycle for every valid occupant and returns the set
    /// of sequence ids that were seen.
    fn ingest(&mut self, pipeline: &PipelineState, cycle: u64) -> BTreeSet<u64> {
        let mut touched = BTreeSet::new();
        for register in PipelineRegister::ALL {
            let Some(occupant) = pipeline.register(register) else {
                continue;
            };
            let Some(seq_id) = occupant.sequence() else {
                continue;
            };

            let stage = self.naming.stage_for(register);
            let row = self.rows.entry(seq_id).or_insert_with(|| {
                GanttRow::new(
                    seq_id,
                    occupant.display_pc().unwrap_or(&self.unknown_pc),
                    occupant.display_instr().unwrap_or(&self.unknown_instr),
                )
            });
            row.stages.set(cycle, stage);
            let _ = touched.insert(seq_id);
        }
        touched
    }

    /// Marks `FLUSH` on rows that were in flight last cycle and are gone now.
    fn infer_flushes(&mut self, touched: &BTreeSet<u64>, cycle: u64) {
        let Some(previous) = cycle.checked_sub(1).filter(|&previous| previous > 0) else {
            return;
        };
        for (id, row) in &mut self.rows {
            if touched.contains(id) {
                continue;
            }
            if let Some(last) = row.stages.get(previous).filter(|last| !last.is_terminal()) {
                trace!(seq_id = id, cycle, last = %last, "inferred flush");
                row.stages.set(cycle, Stage::Flush);
            }
        }
    }

    /// Rows in ascending sequence-id order.
    pub fn history(&self) -> Vec<&GanttRow> {
        self.rows.values().collect()
    }

    /// Iterates rows in ascending sequence-id order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &GanttRow> + '_ {
        self.rows.values()
    }

    /// Row of `seq_id`, if tracked.
    pub fn row(&self, seq_id: u64) -> Option<&GanttRow> {
        self.rows.get(&seq_id)
    }

    /// Earliest cycle labelled in any tracked row.
    pub fn first_cycle(&self) -> Option<u64> {
        self.rows.values().filter_map(|row| row.stages.first_cycle()).min()
    }

    /// Cycle of the last processed snapshot; 0 when idle.
    #[inline]
    pub const fn cycle_count(&self) -> u64 {
        self.current_cycle
    }

    /// Number of tracked rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no row is tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Latch naming convention in use.
    #[inline]
    pub const fn naming(&self) -> LatchNaming {
        self.naming
    }
}
