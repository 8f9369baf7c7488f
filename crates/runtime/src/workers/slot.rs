//! Per-worker published state.
//!
//! Each worker owns exactly one slot and replaces its snapshot wholesale after
//! every generation, so readers never observe a half-written path.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use planner_core::PathState;

use crate::workers::WorkerMetrics;

/// Latest result published by one worker.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkerSnapshot {
    pub worker: usize,
    pub state: PathState,
    pub generation: u64,
    pub last_generation: Duration,
}

/// Shared slot written by a single worker and read by anyone.
#[derive(Debug, Default)]
pub struct WorkerSlot {
    snapshot: ArcSwapOption<WorkerSnapshot>,
    metrics: WorkerMetrics,
}

impl WorkerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn publish(&self, snapshot: WorkerSnapshot) {
        self.snapshot.store(Some(Arc::new(snapshot)));
    }

    /// Latest snapshot, or `None` before the first generation completes.
    pub fn snapshot(&self) -> Option<Arc<WorkerSnapshot>> {
        self.snapshot.load_full()
    }

    pub fn metrics(&self) -> &WorkerMetrics {
        &self.metrics
    }
}
