//! Plain-text views.
//!
//! Fixed-width renderings of the tracker state for terminals and logs. It provides:
//! 1. **Cell Classification:** Whether a timeline cell shows a stage, a stall, a flush or nothing.
//! 2. **Gantt Table:** One line per instruction, one column per cycle.
//! 3. **Metrics Table:** The recorded series followed by a summary line.
//! 4. **Pipeline View:** The diagram boxes and active forwarding paths.
//!
//! Every view borrows the state it renders and implements [`fmt::Display`].

use std::fmt::{self, Write as _};

use crate::history::{HistoryEngine, Stage, StageTimeline};
use crate::metrics::MetricsRecorder;
use crate::projector::{ForwardingPaths, PipelineDiagram};
use crate::snapshot::ForwardSource;

/// Shown by the metrics table before anything is recorded.
pub const NO_METRICS: &str = "No data yet. Run the simulation!";

/// Width of a cycle column; fits the longest cell text.
const CELL_WIDTH: usize = 5;

/// Presentation class of one timeline cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// No label this cycle.
    Empty,
    /// The instruction advanced into a stage.
    Stage(Stage),
    /// The instruction held the same stage as the previous cycle.
    Stall,
    /// The instruction was flushed.
    Flush,
}

impl CellKind {
    /// Classifies the cell of `cycle` (1-based) in `timeline`.
    ///
    /// A label repeated from the previous cycle is a stall, except for
    /// write-back and flush which may legitimately repeat.
    pub fn classify(timeline: &StageTimeline, cycle: u64) -> Self {
        let Some(stage) = timeline.get(cycle) else {
            return Self::Empty;
        };
        if stage == Stage::Flush {
            return Self::Flush;
        }
        let previous = cycle.checked_sub(1).and_then(|previous| timeline.get(previous));
        if previous == Some(stage) && !stage.is_terminal() {
            Self::Stall
        } else {
            Self::Stage(stage)
        }
    }

    /// Cell text.
    pub const fn text(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Stage(stage) => stage.label(),
            Self::Stall => "STALL",
            Self::Flush => "FLUSH",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.text())
    }
}

/// Text Gantt chart of every tracked instruction.
#[derive(Debug, Clone, Copy)]
pub struct GanttTable<'a> {
    history: &'a HistoryEngine,
}

/// Renders the instruction timelines from the earliest labelled cycle up to
/// the current cycle.
pub const fn gantt_table(history: &HistoryEngine) -> GanttTable<'_> {
    GanttTable { history }
}

impl fmt::Display for GanttTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const HEADER: &str = "Instruction";

        let labels: Vec<String> = self
            .history
            .rows()
            .map(|row| format!("#{} {} {}", row.id, row.pc, row.instr))
            .collect();
        let width = labels
            .iter()
            .map(|label| label.chars().count())
            .fold(HEADER.len(), usize::max);
        let cycles = self.history.first_cycle().unwrap_or(1)..=self.history.cycle_count();

        let mut line = format!("{HEADER:<width$}");
        for cycle in cycles.clone() {
            write!(line, " | {:<CELL_WIDTH$}", format!("C{cycle}"))?;
        }
        writeln!(f, "{}", line.trim_end())?;

        for (row, label) in self.history.rows().zip(&labels) {
            line.clear();
            write!(line, "{label:<width$}")?;
            for cycle in cycles.clone() {
                write!(line, " | {:<CELL_WIDTH$}", CellKind::classify(&row.stages, cycle))?;
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

/// Text dump of the metrics series.
#[derive(Debug, Clone, Copy)]
pub struct MetricsTable<'a> {
    metrics: &'a MetricsRecorder,
}

/// Renders the recorded metrics and a summary of the latest point.
pub const fn metrics_table(metrics: &MetricsRecorder) -> MetricsTable<'_> {
    MetricsTable { metrics }
}

impl fmt::Display for MetricsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(latest), Some(peak)) = (self.metrics.latest(), self.metrics.peak_cpi()) else {
            return writeln!(f, "{NO_METRICS}");
        };

        writeln!(f, "{:>10} {:>8} {:>8}", "cycle", "cpi", "stalls")?;
        for point in self.metrics.points() {
            writeln!(f, "{:>10} {:>8.2} {:>8}", point.cycle, point.cpi, point.stalls)?;
        }
        writeln!(
            f,
            "CPI: {:.2} (peak {peak:.2}) | Stalls: {}",
            latest.cpi, latest.stalls
        )
    }
}

/// Text rendering of the pipeline diagram and forwarding paths.
#[derive(Debug, Clone, Copy)]
pub struct DiagramView<'a> {
    diagram: &'a PipelineDiagram,
    forwarding: &'a ForwardingPaths,
}

/// Renders one line per stage box followed by the active forwarding paths.
pub const fn diagram_view<'a>(
    diagram: &'a PipelineDiagram,
    forwarding: &'a ForwardingPaths,
) -> DiagramView<'a> {
    DiagramView {
        diagram,
        forwarding,
    }
}

impl fmt::Display for DiagramView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pc_width = self
            .diagram
            .boxes
            .iter()
            .map(|stage_box| stage_box.pc.chars().count())
            .max()
            .unwrap_or(0);
        for stage_box in &self.diagram.boxes {
            let line = format!("{:<3} | {:<pc_width$} | {}", stage_box.stage, stage_box.pc, stage_box.instr);
            writeln!(f, "{}", line.trim_end())?;
        }

        let paths = [
            ("ALU A", self.forwarding.alu_a),
            ("ALU B", self.forwarding.alu_b),
            ("BR A", self.forwarding.branch_a),
            ("BR B", self.forwarding.branch_b),
        ];
        for (operand, source) in paths {
            let from = match source {
                ForwardSource::None => continue,
                ForwardSource::ExMem => "EX/MEM",
                ForwardSource::MemWb => "MEM/WB",
            };
            writeln!(f, "forward {operand} <- {from}")?;
        }
        Ok(())
    }
}
