//! Debugger snapshot schema.
//!
//! A snapshot is what the debugger reports once per observed cycle. It provides:
//! 1. **Pipeline State:** One occupant record per pipeline register (IF/ID, ID/EX, EX/MEM, MEM/WB, Retired).
//! 2. **VM Summary:** Cycle count, retired instructions, stall cycles and program counter.
//!
//! The schema is versioned by the debugger, not by this crate, so parsing is
//! defensive: only the fields read here are validated, every field is
//! optional, and a mistyped field degrades to zero or a placeholder instead of
//! rejecting the snapshot.

use serde::Deserialize;
use serde_json::Value;

use crate::common::error::SnapshotError;

/// Lenient coercion helpers for loosely typed payload fields.
pub mod coerce;

/// Pipeline register identities, naming conventions and forwarding tags.
pub mod latches;

pub use latches::{ForwardSource, LatchNaming, PipelineRegister};

/// Record describing what occupies one pipeline register.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StageOccupant {
    /// Whether the register holds a real instruction rather than a bubble.
    #[serde(deserialize_with = "coerce::lenient_bool")]
    pub valid: bool,
    /// Identity of the in-flight instruction; 0 means no instruction.
    #[serde(deserialize_with = "coerce::lenient_u64")]
    pub seq_id: u64,
    /// Hex program counter of the instruction.
    #[serde(deserialize_with = "coerce::lenient_text")]
    pub pc: Option<String>,
    /// Program counter under the older field name some debugger builds emit.
    #[serde(rename = "CurrentPC", deserialize_with = "coerce::lenient_text")]
    pub current_pc: Option<String>,
    /// Disassembly of the instruction.
    #[serde(deserialize_with = "coerce::lenient_text")]
    pub instr: Option<String>,
    /// 1-based source line; 0 or negative means unknown.
    #[serde(deserialize_with = "coerce::lenient_i64")]
    pub line: i64,
    /// Whether the instruction is held by a hazard (reported on IF/ID only).
    #[serde(rename = "isStalled", deserialize_with = "coerce::lenient_bool")]
    pub is_stalled: bool,
    /// Forwarding source of the first execute operand.
    #[serde(deserialize_with = "coerce::lenient_forward")]
    pub forward_a: ForwardSource,
    /// Forwarding source of the second execute operand.
    #[serde(deserialize_with = "coerce::lenient_forward")]
    pub forward_b: ForwardSource,
    /// Forwarding source of the first branch-comparison operand.
    #[serde(deserialize_with = "coerce::lenient_forward")]
    pub forward_branch_a: ForwardSource,
    /// Forwarding source of the second branch-comparison operand.
    #[serde(deserialize_with = "coerce::lenient_forward")]
    pub forward_branch_b: ForwardSource,
}

impl StageOccupant {
    /// Sequence id of a valid occupant, or `None` for bubbles and missing ids.
    #[inline]
    pub const fn sequence(&self) -> Option<u64> {
        if self.valid && self.seq_id > 0 {
            Some(self.seq_id)
        } else {
            None
        }
    }

    /// Program counter text, preferring `pc` over the legacy `CurrentPC`.
    pub fn display_pc(&self) -> Option<&str> {
        self.pc.as_deref().or(self.current_pc.as_deref())
    }

    /// Disassembly text, if the debugger sent any.
    pub fn display_instr(&self) -> Option<&str> {
        self.instr.as_deref()
    }

    /// 1-based source line, if known.
    pub fn source_line(&self) -> Option<u32> {
        u32::try_from(self.line).ok().filter(|&line| line > 0)
    }
}

/// Occupants of every pipeline register for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineState {
    /// IF/ID latch.
    #[serde(rename = "IF_ID", deserialize_with = "coerce::lenient_optional")]
    pub if_id: Option<StageOccupant>,
    /// ID/EX latch.
    #[serde(rename = "ID_EX", deserialize_with = "coerce::lenient_optional")]
    pub id_ex: Option<StageOccupant>,
    /// EX/MEM latch.
    #[serde(rename = "EX_MEM", deserialize_with = "coerce::lenient_optional")]
    pub ex_mem: Option<StageOccupant>,
    /// MEM/WB latch.
    #[serde(rename = "MEM_WB", deserialize_with = "coerce::lenient_optional")]
    pub mem_wb: Option<StageOccupant>,
    /// Retirement record.
    #[serde(rename = "Retired", deserialize_with = "coerce::lenient_optional")]
    pub retired: Option<StageOccupant>,
}

impl PipelineState {
    /// Returns the occupant record of `register`, if the debugger sent one.
    pub const fn register(&self, register: PipelineRegister) -> Option<&StageOccupant> {
        match register {
            PipelineRegister::IfId => self.if_id.as_ref(),
            PipelineRegister::IdEx => self.id_ex.as_ref(),
            PipelineRegister::ExMem => self.ex_mem.as_ref(),
            PipelineRegister::MemWb => self.mem_wb.as_ref(),
            PipelineRegister::Retired => self.retired.as_ref(),
        }
    }

    /// Returns a mutable slot for `register`.
    pub fn register_mut(&mut self, register: PipelineRegister) -> &mut Option<StageOccupant> {
        match register {
            PipelineRegister::IfId => &mut self.if_id,
            PipelineRegister::IdEx => &mut self.id_ex,
            PipelineRegister::ExMem => &mut self.ex_mem,
            PipelineRegister::MemWb => &mut self.mem_wb,
            PipelineRegister::Retired => &mut self.retired,
        }
    }

    /// Returns the occupant of `register` only if it is marked valid.
    pub fn valid(&self, register: PipelineRegister) -> Option<&StageOccupant> {
        self.register(register).filter(|occupant| occupant.valid)
    }
}

/// Summary counters of the simulated machine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VmSummary {
    /// Absolute simulated cycle, starting at 1; 0 or less means not running.
    #[serde(deserialize_with = "coerce::lenient_i64")]
    pub cycle_count: i64,
    /// Cumulative retired-instruction count.
    #[serde(deserialize_with = "coerce::lenient_u64")]
    pub instructions_retired: u64,
    /// Cumulative stall-cycle count.
    #[serde(deserialize_with = "coerce::lenient_u64")]
    pub stall_cycles: u64,
    /// Current fetch PC, display only.
    #[serde(deserialize_with = "coerce::lenient_text")]
    pub program_counter: Option<String>,
}

impl VmSummary {
    /// Current cycle if the simulation is running, `None` otherwise.
    #[inline]
    pub fn cycle(&self) -> Option<u64> {
        u64::try_from(self.cycle_count).ok().filter(|&cycle| cycle > 0)
    }
}

/// Pipeline and VM state observed for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Pipeline register occupants.
    #[serde(deserialize_with = "coerce::lenient_section")]
    pub pipeline: PipelineState,
    /// VM summary counters.
    #[serde(deserialize_with = "coerce::lenient_section")]
    pub vm: VmSummary,
}

impl Snapshot {
    /// Pairs separately fetched pipeline and VM states.
    pub const fn new(pipeline: PipelineState, vm: VmSummary) -> Self {
        Self { pipeline, vm }
    }

    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Fails only if `text` is not JSON or its top level is not an object.
    /// Missing and malformed fields inside the object are coerced instead.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Builds a snapshot from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Fails if `value` is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        if value.is_object() {
            return Ok(Self::deserialize(value)?);
        }
        let kind = match value {
            Value::Object(_) => "an object",
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
        };
        Err(SnapshotError::NotAnObject(kind))
    }
}
