//! Snapshot Projector.
//!
//! Stateless projections of a single snapshot. It provides:
//! 1. **Line Highlights:** One 0-based line range per valid latch occupant with a known source line.
//! 2. **Stall Markers:** The decode-input line when IF/ID reports a stall.
//! 3. **Pipeline Diagram:** One box per stage with the occupant's PC and disassembly, or a bubble.
//! 4. **Forwarding Paths:** Operand bypass sources reported on the ID/EX latch.
//!
//! Identical input always yields identical output; nothing is remembered
//! between calls.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::common::constants::{
    BUBBLE_INSTR, BUBBLE_PC, DEFAULT_FETCH_PC, FETCHING_INSTR, UNKNOWN_INSTR,
};
use crate::history::Stage;
use crate::snapshot::{ForwardSource, LatchNaming, PipelineRegister, Snapshot, StageOccupant};

/// Inclusive range of 0-based source lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LineRange {
    /// First highlighted line.
    pub start_line: u32,
    /// Last highlighted line.
    pub end_line: u32,
}

impl LineRange {
    /// Range covering exactly one 0-based line.
    #[inline]
    pub const fn single(line: u32) -> Self {
        Self {
            start_line: line,
            end_line: line,
        }
    }

    /// Range for a 1-based source line.
    fn from_source_line(occupant: &StageOccupant) -> Option<Self> {
        occupant.source_line().map(|line| Self::single(line - 1))
    }
}

/// Line ranges to decorate for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Highlights {
    /// Ranges per stage; stages with nothing to show are absent.
    pub stages: BTreeMap<Stage, Vec<LineRange>>,
    /// Lines held by a stall.
    pub stalled: Vec<LineRange>,
}

impl Highlights {
    /// Ranges highlighted for `stage`; empty when the stage shows nothing.
    pub fn ranges(&self, stage: Stage) -> &[LineRange] {
        self.stages.get(&stage).map_or(&[], Vec::as_slice)
    }

    /// Returns true if nothing is highlighted.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty() && self.stalled.is_empty()
    }
}

/// One box of the pipeline diagram.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StageBox {
    /// Stage the box stands for.
    pub stage: Stage,
    /// Program counter text.
    pub pc: String,
    /// Disassembly text.
    pub instr: String,
    /// Whether the stage holds a bubble.
    pub bubble: bool,
}

impl StageBox {
    fn bubble(stage: Stage) -> Self {
        Self {
            stage,
            pc: BUBBLE_PC.to_owned(),
            instr: BUBBLE_INSTR.to_owned(),
            bubble: true,
        }
    }

    fn occupied(stage: Stage, occupant: &StageOccupant) -> Self {
        Self {
            stage,
            pc: occupant.display_pc().unwrap_or(UNKNOWN_INSTR).to_owned(),
            instr: occupant.display_instr().unwrap_or(UNKNOWN_INSTR).to_owned(),
            bubble: false,
        }
    }
}

/// Five-box view of what each stage is working on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineDiagram {
    /// Boxes in flow order IF, ID, EX, MEM, WB.
    pub boxes: [StageBox; 5],
}

impl PipelineDiagram {
    /// Diagram of the current cycle.
    ///
    /// Fetch shows the VM program counter, the other stages show the
    /// occupant of the latch feeding them.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let fetch = StageBox {
            stage: Stage::Fetch,
            pc: snapshot
                .vm
                .program_counter
                .clone()
                .unwrap_or_else(|| DEFAULT_FETCH_PC.to_owned()),
            instr: FETCHING_INSTR.to_owned(),
            bubble: false,
        };
        let latch = |register: PipelineRegister, stage: Stage| {
            snapshot
                .pipeline
                .valid(register)
                .map_or_else(|| StageBox::bubble(stage), |occupant| StageBox::occupied(stage, occupant))
        };

        Self {
            boxes: [
                fetch,
                latch(PipelineRegister::IfId, Stage::Decode),
                latch(PipelineRegister::IdEx, Stage::Execute),
                latch(PipelineRegister::ExMem, Stage::Memory),
                latch(PipelineRegister::MemWb, Stage::Writeback),
            ],
        }
    }

    /// Box of `stage`; `Flush` has no box.
    pub fn stage(&self, stage: Stage) -> Option<&StageBox> {
        self.boxes.iter().find(|stage_box| stage_box.stage == stage)
    }
}

/// Operand bypass sources of the instruction in execute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ForwardingPaths {
    /// First ALU operand.
    pub alu_a: ForwardSource,
    /// Second ALU operand.
    pub alu_b: ForwardSource,
    /// First branch-comparison operand; only EX/MEM bypasses are drawn.
    pub branch_a: ForwardSource,
    /// Second branch-comparison operand; only EX/MEM bypasses are drawn.
    pub branch_b: ForwardSource,
}

impl ForwardingPaths {
    /// Forwarding paths into the execute stage. A bubble in ID/EX forwards
    /// nothing, whatever tags it carries.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let Some(id_ex) = snapshot.pipeline.valid(PipelineRegister::IdEx) else {
            return Self::default();
        };
        let branch = |source: ForwardSource| match source {
            ForwardSource::ExMem => ForwardSource::ExMem,
            ForwardSource::None | ForwardSource::MemWb => ForwardSource::None,
        };
        Self {
            alu_a: id_ex.forward_a,
            alu_b: id_ex.forward_b,
            branch_a: branch(id_ex.forward_branch_a),
            branch_b: branch(id_ex.forward_branch_b),
        }
    }

    /// Returns true if no operand is forwarded.
    pub const fn is_empty(&self) -> bool {
        !(self.alu_a.is_forwarded()
            || self.alu_b.is_forwarded()
            || self.branch_a.is_forwarded()
            || self.branch_b.is_forwarded())
    }
}

/// Stateless mapper from snapshots to editor decorations and diagrams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnapshotProjector {
    naming: LatchNaming,
}

impl SnapshotProjector {
    /// Creates a projector labelling latches with `naming`.
    pub const fn new(naming: LatchNaming) -> Self {
        Self { naming }
    }

    /// Latch naming convention in use.
    #[inline]
    pub const fn naming(&self) -> LatchNaming {
        self.naming
    }

    /// Source-line highlights of the current cycle.
    pub fn project(&self, snapshot: &Snapshot) -> Highlights {
        let mut highlights = Highlights::default();
        for register in PipelineRegister::LATCHES {
            let Some(range) = snapshot
                .pipeline
                .valid(register)
                .and_then(LineRange::from_source_line)
            else {
                continue;
            };
            highlights
                .stages
                .entry(self.naming.stage_for(register))
                .or_default()
                .push(range);
        }

        if let Some(range) = snapshot
            .pipeline
            .valid(PipelineRegister::IfId)
            .filter(|occupant| occupant.is_stalled)
            .and_then(LineRange::from_source_line)
        {
            highlights.stalled.push(range);
        }
        highlights
    }
}
