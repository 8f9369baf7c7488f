//! Blocking search worker.
//!
//! Runs one [`PathPlanner`] until the shared cancellation flag is raised or the
//! worker's time budget elapses. Panics are caught here so a faulty oracle or
//! planner bug only ends this worker.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{debug, error, info, trace};

use planner_core::{Environment, PathPlanner, PlannerSettings};

use crate::workers::{ExitReason, WorkerSlot, WorkerSnapshot};

pub(crate) struct SearchWorker {
    index: usize,
    settings: PlannerSettings,
    environment: Arc<Environment>,
    slots: Arc<[WorkerSlot]>,
    cancel: Arc<AtomicBool>,
}

impl SearchWorker {
    pub(crate) fn new(
        index: usize,
        settings: PlannerSettings,
        environment: Arc<Environment>,
        slots: Arc<[WorkerSlot]>,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            index,
            settings,
            environment,
            slots,
            cancel,
        }
    }

    /// Worker entry point; returns once the worker has stopped for any reason.
    pub(crate) fn run(self) {
        let slot = &self.slots[self.index];
        debug!(worker = self.index, "search worker started");

        let reason = match panic::catch_unwind(AssertUnwindSafe(|| self.search(slot))) {
            Ok(reason) => reason,
            Err(payload) => {
                error!(
                    worker = self.index,
                    generation = slot.metrics().generations(),
                    panic = %panic_message(payload.as_ref()),
                    "search worker panicked"
                );
                ExitReason::Panicked
            }
        };
        slot.metrics().record_exit(reason);

        let best = slot.snapshot().map(|snapshot| snapshot.state.score);
        info!(
            worker = self.index,
            %reason,
            generations = slot.metrics().generations(),
            best_score = ?best,
            "search worker stopped"
        );
    }

    fn search(&self, slot: &WorkerSlot) -> ExitReason {
        let planner = match self.settings.seed {
            Some(seed) => PathPlanner::seeded(&self.settings, seed.wrapping_add(self.index as u64)),
            None => PathPlanner::from_entropy(&self.settings),
        };
        let budget = self.settings.maximum_generation_time;
        let started = Instant::now();
        let mut series = planner.series(&self.environment);

        loop {
            if self.cancel.load(Ordering::Acquire) {
                return ExitReason::Cancelled;
            }

            let generation_started = Instant::now();
            let state = series.step();
            let duration = generation_started.elapsed();
            let elapsed = started.elapsed();

            slot.metrics().record_generation(duration, elapsed);
            trace!(
                worker = self.index,
                generation = series.generation(),
                score = state.score,
                ?duration,
                "generation complete"
            );
            slot.publish(WorkerSnapshot {
                worker: self.index,
                state,
                generation: series.generation(),
                last_generation: duration,
            });

            if budget.is_some_and(|budget| elapsed >= budget) {
                return ExitReason::TimeBudget;
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
