//! Pipeline latch identities and their stage labels.
//!
//! The debugger exposes the four inter-stage latches of the 5-stage pipeline
//! plus a retirement record for the instruction that last completed
//! write-back. This module names those registers, fixes the order in which
//! they are ingested, and maps each one to the stage label it contributes.

use serde::{Deserialize, Serialize};

use crate::history::stage::Stage;

/// One of the pipeline registers exposed in a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PipelineRegister {
    /// IF/ID latch: fetched instruction waiting for decode.
    IfId,
    /// ID/EX latch: decoded instruction waiting for execute.
    IdEx,
    /// EX/MEM latch: executed instruction waiting for memory access.
    ExMem,
    /// MEM/WB latch: instruction waiting for write-back.
    MemWb,
    /// Retirement record: instruction that completed write-back.
    Retired,
}

impl PipelineRegister {
    /// Every register in ingestion order. A later register wins when the
    /// same sequence id shows up twice in one cycle.
    pub const ALL: [Self; 5] = [Self::IfId, Self::IdEx, Self::ExMem, Self::MemWb, Self::Retired];

    /// The four inter-stage latches, without the retirement record.
    pub const LATCHES: [Self; 4] = [Self::IfId, Self::IdEx, Self::ExMem, Self::MemWb];
}

/// Convention deciding which stage a latch occupant is reported in.
///
/// A latch sits between two stages, so an instruction held in IF/ID can be
/// read as "just fetched" or as "being decoded". Both readings occur in
/// debugger front-ends; the editor highlights use the consumer reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum LatchNaming {
    /// A latch reports the stage that consumes it: IF/ID is ID, ID/EX is EX,
    /// EX/MEM is MEM, MEM/WB is WB. The retirement record is WB.
    #[default]
    #[serde(alias = "consumer")]
    Consumer,
    /// A latch reports the stage that produced it: IF/ID is IF, ID/EX is ID,
    /// EX/MEM is EX, MEM/WB is MEM. The retirement record is WB.
    #[serde(alias = "producer")]
    Producer,
}

impl LatchNaming {
    /// Stage label contributed by an occupant of `register`.
    pub const fn stage_for(self, register: PipelineRegister) -> Stage {
        match (self, register) {
            (Self::Producer, PipelineRegister::IfId) => Stage::Fetch,
            (Self::Consumer, PipelineRegister::IfId) | (Self::Producer, PipelineRegister::IdEx) => {
                Stage::Decode
            }
            (Self::Consumer, PipelineRegister::IdEx) | (Self::Producer, PipelineRegister::ExMem) => {
                Stage::Execute
            }
            (Self::Consumer, PipelineRegister::ExMem) | (Self::Producer, PipelineRegister::MemWb) => {
                Stage::Memory
            }
            (Self::Consumer, PipelineRegister::MemWb) | (_, PipelineRegister::Retired) => {
                Stage::Writeback
            }
        }
    }
}

/// Source of a forwarded operand, as reported on the ID/EX latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ForwardSource {
    /// Operand read from the register file.
    #[default]
    None,
    /// Operand forwarded from the EX/MEM latch.
    ExMem,
    /// Operand forwarded from the MEM/WB latch.
    MemWb,
}

impl ForwardSource {
    /// Parses the debugger's tag; unknown tags mean no forwarding.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "ExMem" => Self::ExMem,
            "MemWb" => Self::MemWb,
            _ => Self::None,
        }
    }

    /// Returns true if the operand bypassed the register file.
    #[inline]
    pub const fn is_forwarded(self) -> bool {
        !matches!(self, Self::None)
    }
}
