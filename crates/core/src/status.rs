//! Status line summary.
//!
//! Condenses the VM counters of one snapshot into the three labels shown in
//! the editor status bar: program counter, retired instructions and
//! performance (cycles, stalls, CPI).

use std::fmt;

use serde::Serialize;

use crate::common::constants::DEFAULT_FETCH_PC;
use crate::metrics::cpi;
use crate::snapshot::VmSummary;

/// Status bar summary of the simulated machine.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusLine {
    /// Current fetch PC.
    pub pc: String,
    /// Cumulative retired instructions.
    pub instructions_retired: u64,
    /// Current cycle; 0 when not running.
    pub cycles: u64,
    /// Cumulative stall cycles.
    pub stalls: u64,
    /// Cycles per instruction; `None` until something retires.
    pub cpi: Option<f64>,
}

impl StatusLine {
    /// Builds the summary from VM counters.
    pub fn from_vm(vm: &VmSummary) -> Self {
        let cycles = vm.cycle().unwrap_or(0);
        Self {
            pc: vm
                .program_counter
                .clone()
                .unwrap_or_else(|| DEFAULT_FETCH_PC.to_owned()),
            instructions_retired: vm.instructions_retired,
            cycles,
            stalls: vm.stall_cycles,
            cpi: (vm.instructions_retired > 0).then(|| cpi(cycles, vm.instructions_retired)),
        }
    }

    /// `PC: <pc>`.
    pub fn pc_label(&self) -> String {
        format!("PC: {}", self.pc)
    }

    /// `Instr: <n>`.
    pub fn instructions_label(&self) -> String {
        format!("Instr: {}", self.instructions_retired)
    }

    /// `Cycles: <n> | Stalls: <n> | CPI: <x.xx>`, with `N/A` for an undefined CPI.
    pub fn performance_label(&self) -> String {
        let cpi = self
            .cpi
            .map_or_else(|| "N/A".to_owned(), |cpi| format!("{cpi:.2}"));
        format!("Cycles: {} | Stalls: {} | CPI: {cpi}", self.cycles, self.stalls)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  {}",
            self.pc_label(),
            self.instructions_label(),
            self.performance_label()
        )
    }
}
