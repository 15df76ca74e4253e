use pipeview_core::snapshot::{
    ForwardSource, PipelineRegister, Snapshot, StageOccupant, VmSummary,
};

/// Builds one latch occupant; valid by default.
pub struct OccupantBuilder(StageOccupant);

/// Starts a valid occupant with `seq_id`.
pub fn occupant(seq_id: u64) -> OccupantBuilder {
    OccupantBuilder::new(seq_id)
}

impl OccupantBuilder {
    pub fn new(seq_id: u64) -> Self {
        Self(StageOccupant {
            valid: true,
            seq_id,
            ..StageOccupant::default()
        })
    }

    pub fn invalid(mut self) -> Self {
        self.0.valid = false;
        self
    }

    pub fn pc(mut self, pc: &str) -> Self {
        self.0.pc = Some(pc.to_owned());
        self
    }

    pub fn instr(mut self, instr: &str) -> Self {
        self.0.instr = Some(instr.to_owned());
        self
    }

    pub fn line(mut self, line: i64) -> Self {
        self.0.line = line;
        self
    }

    pub fn stalled(mut self) -> Self {
        self.0.is_stalled = true;
        self
    }

    pub fn forward(mut self, a: ForwardSource, b: ForwardSource) -> Self {
        self.0.forward_a = a;
        self.0.forward_b = b;
        self
    }

    pub fn forward_branch(mut self, a: ForwardSource, b: ForwardSource) -> Self {
        self.0.forward_branch_a = a;
        self.0.forward_branch_b = b;
        self
    }

    pub fn build(self) -> StageOccupant {
        self.0
    }
}

/// Builds one snapshot at a given cycle.
pub struct SnapshotBuilder(Snapshot);

/// Starts a snapshot at `cycle` with an empty pipeline.
pub fn snapshot(cycle: i64) -> SnapshotBuilder {
    SnapshotBuilder::new(cycle)
}

impl SnapshotBuilder {
    pub fn new(cycle: i64) -> Self {
        Self(Snapshot {
            vm: VmSummary {
                cycle_count: cycle,
                ..VmSummary::default()
            },
            ..Snapshot::default()
        })
    }

    pub fn retired(mut self, instructions: u64) -> Self {
        self.0.vm.instructions_retired = instructions;
        self
    }

    pub fn stalls(mut self, stalls: u64) -> Self {
        self.0.vm.stall_cycles = stalls;
        self
    }

    pub fn program_counter(mut self, pc: &str) -> Self {
        self.0.vm.program_counter = Some(pc.to_owned());
        self
    }

    pub fn slot(mut self, register: PipelineRegister, occupant: OccupantBuilder) -> Self {
        *self.0.pipeline.register_mut(register) = Some(occupant.build());
        self
    }

    // --- Shorthands for a bare valid occupant ---

    pub fn if_id(self, seq_id: u64) -> Self {
        self.slot(PipelineRegister::IfId, occupant(seq_id))
    }

    pub fn id_ex(self, seq_id: u64) -> Self {
        self.slot(PipelineRegister::IdEx, occupant(seq_id))
    }

    pub fn ex_mem(self, seq_id: u64) -> Self {
        self.slot(PipelineRegister::ExMem, occupant(seq_id))
    }

    pub fn mem_wb(self, seq_id: u64) -> Self {
        self.slot(PipelineRegister::MemWb, occupant(seq_id))
    }

    pub fn retired_slot(self, seq_id: u64) -> Self {
        self.slot(PipelineRegister::Retired, occupant(seq_id))
    }

    pub fn build(self) -> Snapshot {
        self.0
    }
}
