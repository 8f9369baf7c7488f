//! Parallel planner orchestration.
//!
//! [`PlannerRunner`] fans out one search worker per configured thread, all
//! sharing the same [`Environment`] but drawing independent randomness. Workers
//! publish into a fixed slot array allocated before any of them starts; the
//! read side aggregates across slots.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use planner_core::{Environment, EnvironmentBuilder, PlannerSettings, Point};

use crate::error::{Result, RunnerError};
use crate::workers::{MetricsSnapshot, SearchWorker, WorkerSlot, WorkerSnapshot};

/// Drives a set of search workers and exposes their combined best result.
///
/// The runner can be restarted once every worker from the previous run has
/// stopped; each run gets fresh slots and a fresh cancellation flag.
pub struct PlannerRunner {
    slots: Arc<[WorkerSlot]>,
    cancel: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl PlannerRunner {
    pub fn new() -> Self {
        Self {
            slots: Arc::from(Vec::new()),
            cancel: Arc::new(AtomicBool::new(false)),
            workers: Vec::new(),
        }
    }

    /// Spawns `settings.thread_count()` workers over `environment`.
    ///
    /// Fails without spawning anything when settings are invalid, when called
    /// outside a tokio runtime, or while a previous run is still active.
    pub fn start(&mut self, settings: PlannerSettings, environment: Arc<Environment>) -> Result<()> {
        if self.is_running() {
            return Err(RunnerError::AlreadyRunning);
        }
        if let Err(error) = settings.validate() {
            warn!(%error, "rejecting planner settings");
            return Err(error.into());
        }
        let handle = Handle::try_current().map_err(|_| RunnerError::NoAsyncRuntime)?;

        let threads = settings.thread_count();
        let slots: Arc<[WorkerSlot]> = (0..threads).map(|_| WorkerSlot::new()).collect();
        let cancel = Arc::new(AtomicBool::new(false));

        info!(
            threads,
            population = settings.population_size,
            path_length = environment.path_length(),
            reward_sites = environment.reward_sites().len(),
            modifier_sites = environment.modifier_sites().len(),
            budget = ?settings.maximum_generation_time,
            "starting planner"
        );

        self.workers = (0..threads)
            .map(|index| {
                let worker = SearchWorker::new(
                    index,
                    settings.clone(),
                    Arc::clone(&environment),
                    Arc::clone(&slots),
                    Arc::clone(&cancel),
                );
                handle.spawn_blocking(move || worker.run())
            })
            .collect();
        self.slots = slots;
        self.cancel = cancel;

        Ok(())
    }

    /// Builds the environment and starts on it, returning the shared snapshot.
    pub fn start_with(
        &mut self,
        settings: PlannerSettings,
        builder: EnvironmentBuilder,
    ) -> Result<Arc<Environment>> {
        let environment = Arc::new(builder.build()?);
        self.start(settings, Arc::clone(&environment))?;
        Ok(environment)
    }

    /// Requests cooperative cancellation; workers exit at their next generation.
    pub fn stop(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    /// True while at least one worker has not finished.
    pub fn is_running(&self) -> bool {
        self.workers.iter().any(|worker| !worker.is_finished())
    }

    /// Waits for every worker of the current run to finish.
    pub async fn join(&mut self) -> Result<()> {
        for worker in self.workers.drain(..) {
            worker.await.map_err(RunnerError::WorkerJoin)?;
        }
        Ok(())
    }

    pub async fn stop_and_join(&mut self) -> Result<()> {
        self.stop();
        self.join().await
    }

    /// Highest-scoring published snapshot across all workers.
    pub fn current_best(&self) -> Option<Arc<WorkerSnapshot>> {
        self.slots
            .iter()
            .filter_map(WorkerSlot::snapshot)
            .max_by(|a, b| a.state.score.total_cmp(&b.state.score))
    }

    /// Best path so far; empty before any worker has finished a generation.
    pub fn current_best_path(&self) -> Vec<Point> {
        self.current_best()
            .map(|snapshot| snapshot.state.points.clone())
            .unwrap_or_default()
    }

    pub fn current_best_score(&self) -> Option<f64> {
        self.current_best().map(|snapshot| snapshot.state.score)
    }

    /// Latest snapshot of every worker that has published one.
    pub fn snapshots(&self) -> Vec<Arc<WorkerSnapshot>> {
        self.slots.iter().filter_map(WorkerSlot::snapshot).collect()
    }

    /// Metrics of every worker in the current run, by worker index.
    pub fn metrics(&self) -> Vec<MetricsSnapshot> {
        self.slots.iter().map(|slot| slot.metrics().snapshot()).collect()
    }

    pub fn worker_count(&self) -> usize {
        self.slots.len()
    }
}

impl Default for PlannerRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PlannerRunner {
    fn drop(&mut self) {
        self.stop();
    }
}
