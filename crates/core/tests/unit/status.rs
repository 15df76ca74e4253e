//! # Status Line Tests

use pipeview_core::status::StatusLine;

use crate::common::snapshot;

#[test]
fn test_labels() {
    let status = StatusLine::from_vm(
        &snapshot(25)
            .retired(10)
            .stalls(4)
            .program_counter("0x8000_0010")
            .build()
            .vm,
    );
    assert_eq!(status.pc_label(), "PC: 0x8000_0010");
    assert_eq!(status.instructions_label(), "Instr: 10");
    assert_eq!(status.performance_label(), "Cycles: 25 | Stalls: 4 | CPI: 2.50");
}

#[test]
fn test_cpi_not_available_before_first_retirement() {
    let status = StatusLine::from_vm(&snapshot(3).build().vm);
    assert_eq!(status.cpi, None);
    assert_eq!(status.performance_label(), "Cycles: 3 | Stalls: 0 | CPI: N/A");
}

#[test]
fn test_idle_machine() {
    let status = StatusLine::from_vm(&snapshot(0).build().vm);
    assert_eq!(
        status.to_string(),
        "PC: 0x0  Instr: 0  Cycles: 0 | Stalls: 0 | CPI: N/A"
    );
}
