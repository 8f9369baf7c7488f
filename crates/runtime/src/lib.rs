//! Parallel orchestration for the expedition route planner.
//!
//! [`PlannerRunner`] spawns independent search workers over a shared,
//! read-only [`planner_core::Environment`], lets callers poll the best path
//! found so far, and stops the workers cooperatively.
//!
//! Modules are organized by responsibility:
//! - [`runner`] hosts the orchestrator
//! - [`workers`] holds the blocking search loop, its published slot and metrics
//! - [`error`] defines the error taxonomy surfaced to callers
pub mod error;
pub mod runner;
pub mod workers;

pub use error::{Result, RunnerError};
pub use runner::PlannerRunner;
pub use workers::{ExitReason, MetricsSnapshot, WorkerMetrics, WorkerSlot, WorkerSnapshot};
