//! Stage labels recorded in an instruction timeline.

use std::fmt;

use serde::Serialize;

/// Label of one cycle in an instruction's timeline.
///
/// The five pipeline stages plus `Flush`, which is never reported by the
/// debugger and is inferred when an in-flight instruction disappears.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    /// Instruction fetch.
    #[serde(rename = "IF")]
    Fetch,
    /// Instruction decode.
    #[serde(rename = "ID")]
    Decode,
    /// Execute.
    #[serde(rename = "EX")]
    Execute,
    /// Memory access.
    #[serde(rename = "MEM")]
    Memory,
    /// Write-back.
    #[serde(rename = "WB")]
    Writeback,
    /// Evicted before write-back.
    #[serde(rename = "FLUSH")]
    Flush,
}

impl Stage {
    /// Short label used in timelines and highlights.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fetch => "IF",
            Self::Decode => "ID",
            Self::Execute => "EX",
            Self::Memory => "MEM",
            Self::Writeback => "WB",
            Self::Flush => "FLUSH",
        }
    }

    /// Returns true if an instruction last seen in this stage left the
    /// pipeline normally, so its disappearance is not a flush.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Writeback | Self::Flush)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
