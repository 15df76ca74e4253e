//! # Session Tests

use pipeview_core::config::Config;
use pipeview_core::history::{HistoryEngine, Stage};
use pipeview_core::metrics::MetricsRecorder;
use pipeview_core::projector::{LineRange, SnapshotProjector};
use pipeview_core::session::Session;
use pipeview_core::snapshot::{LatchNaming, PipelineRegister};
use pretty_assertions::assert_eq;

use crate::common::{occupant, snapshot};

#[test]
fn test_observe_feeds_every_tracker() {
    let mut session = Session::new(&Config::default());

    let highlights = session.observe(
        &snapshot(1)
            .retired(0)
            .slot(PipelineRegister::IfId, occupant(1).line(2))
            .build(),
    );

    assert_eq!(highlights.ranges(Stage::Decode), &[LineRange::single(1)]);
    assert_eq!(session.history().cycle_count(), 1);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.metrics().len(), 1);
    assert_eq!(session.highlights(), highlights);
    assert_eq!(session.last_snapshot().and_then(|s| s.vm.cycle()), Some(1));
}

#[test]
fn test_restart_snapshot_clears_both_trackers() {
    let mut session = Session::default();
    let _ = session.observe(&snapshot(1).if_id(1).build());
    let _ = session.observe(&snapshot(2).id_ex(1).build());

    let _ = session.observe(&snapshot(0).build());

    assert!(session.history().is_empty());
    assert!(session.metrics().is_empty());
}

#[test]
fn test_reset_clears_everything() {
    let mut session = Session::default();
    let _ = session.observe(&snapshot(1).if_id(1).build());

    session.reset();

    assert!(session.history().is_empty());
    assert!(session.metrics().is_empty());
    assert!(session.last_snapshot().is_none());
    assert!(session.highlights().is_empty());
    assert_eq!(session.status().cycles, 0);
    assert!(session.forwarding().is_empty());
    assert!(session.diagram().boxes[1..].iter().all(|b| b.bubble));
}

#[test]
fn test_config_reaches_components() {
    let mut config = Config::default();
    config.history.latch_naming = LatchNaming::Producer;
    config.metrics.capacity = 2;
    let mut session = Session::new(&config);

    for cycle in 1..=3 {
        let _ = session.observe(&snapshot(cycle).if_id(cycle as u64).build());
    }

    assert_eq!(session.projector().naming(), LatchNaming::Producer);
    assert_eq!(session.metrics().capacity(), 2);
    assert_eq!(session.metrics().len(), 2);
    assert_eq!(session.history().row(3).unwrap().stages.get(3), Some(Stage::Fetch));
}

#[test]
fn test_from_parts() {
    let session = Session::from_parts(
        HistoryEngine::default(),
        MetricsRecorder::with_capacity(5),
        SnapshotProjector::new(LatchNaming::Consumer),
    );
    assert_eq!(session.metrics().capacity(), 5);
    assert!(session.last_snapshot().is_none());
}
