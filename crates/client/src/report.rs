//! Final JSON report.

use planner_core::Point;
use planner_runtime::PlannerRunner;
use serde::Serialize;

/// Best route found by a run, plus per-worker statistics.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub scenario: String,
    pub score: Option<f64>,
    pub path: Vec<Point>,
    pub workers: Vec<WorkerReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkerReport {
    pub worker: usize,
    pub generations: u64,
    pub best_score: Option<f64>,
    pub exit: Option<String>,
}

impl PlanReport {
    pub fn collect(scenario: impl Into<String>, runner: &PlannerRunner) -> Self {
        let snapshots = runner.snapshots();
        let workers = runner
            .metrics()
            .into_iter()
            .enumerate()
            .map(|(worker, metrics)| WorkerReport {
                worker,
                generations: metrics.generations,
                best_score: snapshots
                    .iter()
                    .find(|snapshot| snapshot.worker == worker)
                    .map(|snapshot| snapshot.state.score),
                exit: metrics.exit.map(|reason| reason.to_string()),
            })
            .collect();

        Self {
            scenario: scenario.into(),
            score: runner.current_best_score(),
            path: runner.current_best_path(),
            workers,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_runner_reports_nothing_found() {
        let report = PlanReport::collect("empty", &PlannerRunner::new());
        assert_eq!(report.score, None);
        assert!(report.path.is_empty());
        assert!(report.workers.is_empty());

        let json = report.to_json().unwrap();
        assert!(json.contains("\"scenario\": \"empty\""));
        assert!(json.contains("\"score\": null"));
    }
}
