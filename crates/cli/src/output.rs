//! View selection and printing.

use std::io::{self, Write};

use clap::ValueEnum;
use pipeview_core::history::GanttRow;
use pipeview_core::metrics::MetricPoint;
use pipeview_core::projector::{ForwardingPaths, Highlights, PipelineDiagram};
use pipeview_core::render::{diagram_view, gantt_table, metrics_table};
use pipeview_core::status::StatusLine;
use pipeview_core::Session;
use serde::Serialize;

use crate::error::CliError;

/// Which part of the session to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Per-instruction stage timelines.
    Gantt,
    /// CPI and stall time series.
    Metrics,
    /// Status bar summary.
    Status,
    /// Pipeline diagram and forwarding paths of the last snapshot.
    Pipeline,
    /// Every view.
    All,
}

impl View {
    fn includes(self, other: Self) -> bool {
        self == Self::All || self == other
    }
}

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Fixed-width text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Prints the selected views as text.
pub fn write_text<W: Write>(out: &mut W, session: &Session, view: View) -> io::Result<()> {
    let sections = [View::Status, View::Pipeline, View::Gantt, View::Metrics];
    let mut first = true;
    for section in sections.into_iter().filter(|&section| view.includes(section)) {
        if !first {
            writeln!(out)?;
        }
        first = false;
        if view == View::All {
            writeln!(out, "== {} ==", title(section))?;
        }
        match section {
            View::Status => writeln!(out, "{}", session.status())?,
            View::Pipeline => {
                let diagram = session.diagram();
                let forwarding = session.forwarding();
                write!(out, "{}", diagram_view(&diagram, &forwarding))?;
            }
            View::Gantt => write!(out, "{}", gantt_table(session.history()))?,
            View::Metrics | View::All => write!(out, "{}", metrics_table(session.metrics()))?,
        }
    }
    Ok(())
}

const fn title(view: View) -> &'static str {
    match view {
        View::Gantt => "Pipeline Timeline",
        View::Metrics => "Performance Metrics",
        View::Status => "Status",
        View::Pipeline => "Pipeline",
        View::All => "All",
    }
}

#[derive(Serialize)]
struct PipelineReport {
    diagram: PipelineDiagram,
    forwarding: ForwardingPaths,
    highlights: Highlights,
}

#[derive(Serialize)]
struct Report<'a> {
    cycle: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<StatusLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pipeline: Option<PipelineReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<&'a GanttRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<Vec<MetricPoint>>,
}

/// Prints the selected views as one JSON document.
pub fn write_json<W: Write>(out: &mut W, session: &Session, view: View) -> Result<(), CliError> {
    let report = Report {
        cycle: session.history().cycle_count(),
        status: view.includes(View::Status).then(|| session.status()),
        pipeline: view.includes(View::Pipeline).then(|| PipelineReport {
            diagram: session.diagram(),
            forwarding: session.forwarding(),
            highlights: session.highlights(),
        }),
        history: view.includes(View::Gantt).then(|| session.history().history()),
        metrics: view.includes(View::Metrics).then(|| session.metrics().history()),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
