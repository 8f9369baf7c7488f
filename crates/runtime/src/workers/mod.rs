//! Search workers that back the planner runner.
//!
//! Every worker runs one planner on a blocking thread and publishes its best
//! path into its own slot after each generation.

mod metrics;
mod search;
mod slot;

pub use metrics::{ExitReason, MetricsSnapshot, WorkerMetrics};
pub(crate) use search::SearchWorker;
pub use slot::{WorkerSlot, WorkerSnapshot};
