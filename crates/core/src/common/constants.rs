//! Global Tracker Constants.
//!
//! This module defines constants shared across the trackers and projections:
//! placeholder text shown when the debugger omits a display field, and default
//! bounds for long-running sessions.

/// PC captured for a new timeline row when the debugger sent none.
pub const UNKNOWN_PC: &str = "??";

/// Disassembly captured for a new timeline row when the debugger sent none.
pub const UNKNOWN_INSTR: &str = "Unknown";

/// PC shown in the pipeline diagram for a bubble.
pub const BUBBLE_PC: &str = "------";

/// Disassembly shown in the pipeline diagram for a bubble.
pub const BUBBLE_INSTR: &str = "NOP";

/// Disassembly shown in the fetch box of the pipeline diagram.
pub const FETCHING_INSTR: &str = "Fetching...";

/// PC shown in the fetch box when the debugger reports no program counter.
pub const DEFAULT_FETCH_PC: &str = "0x0";

/// Default number of metric points retained before FIFO eviction.
pub const METRICS_CAPACITY: usize = 1000;
