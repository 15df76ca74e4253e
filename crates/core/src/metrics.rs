//! Metrics Recorder.
//!
//! Keeps a bounded `(cycle, CPI, stalls)` time series. It provides:
//! 1. **Rewind Tolerance:** A cycle at or before the last recorded one drops every point from that cycle on.
//! 2. **Bounded Memory:** Once the capacity is reached the oldest point is evicted first.
//! 3. **Ordering:** Recorded cycles are always strictly increasing and unique.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, trace};

use crate::common::constants::METRICS_CAPACITY;
use crate::config::MetricsConfig;
use crate::snapshot::VmSummary;

/// Cycles per instruction, or 0 before the first instruction retires.
#[inline]
pub fn cpi(cycle: u64, instructions_retired: u64) -> f64 {
    if instructions_retired > 0 {
        cycle as f64 / instructions_retired as f64
    } else {
        0.0
    }
}

/// One sample of the performance time series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MetricPoint {
    /// Cycle the sample was taken at.
    pub cycle: u64,
    /// Cycles per instruction at that cycle.
    pub cpi: f64,
    /// Cumulative stall cycles at that cycle.
    pub stalls: u64,
}

impl MetricPoint {
    /// Derives a sample from raw counters.
    pub fn new(cycle: u64, instructions_retired: u64, stalls: u64) -> Self {
        Self {
            cycle,
            cpi: cpi(cycle, instructions_retired),
            stalls,
        }
    }
}

/// Bounded, rewind-tolerant performance time series.
#[derive(Clone, Debug)]
pub struct MetricsRecorder {
    points: VecDeque<MetricPoint>,
    capacity: usize,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::with_capacity(METRICS_CAPACITY)
    }
}

impl MetricsRecorder {
    /// Creates a recorder sized by `config`.
    pub fn new(config: &MetricsConfig) -> Self {
        Self::with_capacity(config.capacity)
    }

    /// Creates a recorder keeping at most `capacity` points (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity.min(METRICS_CAPACITY)),
            capacity,
        }
    }

    /// Drops every recorded point.
    pub fn reset(&mut self) {
        self.points.clear();
    }

    /// Records the counters of one VM summary.
    ///
    /// A non-positive cycle resets the series. Missing or malformed counters
    /// have already been coerced to 0 by the snapshot parser.
    pub fn update(&mut self, vm: &VmSummary) {
        let Some(cycle) = vm.cycle() else {
            if !self.points.is_empty() {
                debug!(cycle = vm.cycle_count, "simulation not running, clearing metrics");
            }
            self.reset();
            return;
        };

        if self.points.back().is_some_and(|last| cycle <= last.cycle) {
            let before = self.points.len();
            self.points.retain(|point| point.cycle < cycle);
            debug!(cycle, dropped = before - self.points.len(), "metrics rewind");
        }

        self.points
            .push_back(MetricPoint::new(cycle, vm.instructions_retired, vm.stall_cycles));

        if self.points.len() > self.capacity {
            if let Some(evicted) = self.points.pop_front() {
                trace!(cycle = evicted.cycle, "evicted oldest metric point");
            }
        }
    }

    /// Recorded points in chronological order.
    pub fn history(&self) -> Vec<MetricPoint> {
        self.points.iter().copied().collect()
    }

    /// Iterates recorded points in chronological order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &MetricPoint> + '_ {
        self.points.iter()
    }

    /// Most recent point.
    pub fn latest(&self) -> Option<&MetricPoint> {
        self.points.back()
    }

    /// Highest CPI seen in the retained window.
    pub fn peak_cpi(&self) -> Option<f64> {
        self.points.iter().map(|point| point.cpi).reduce(f64::max)
    }

    /// Maximum number of retained points.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if nothing is recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
