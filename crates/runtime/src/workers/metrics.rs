//! Per-worker search metrics.
//!
//! Tracks generation throughput and how each worker ended.

use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;

/// Why a search worker stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ExitReason {
    /// The shared cancellation flag was raised.
    Cancelled,
    /// The worker's wall-clock budget ran out.
    TimeBudget,
    /// A generation panicked; the worker's last snapshot stays published.
    Panicked,
}

impl ExitReason {
    const fn code(self) -> u8 {
        match self {
            Self::Cancelled => 1,
            Self::TimeBudget => 2,
            Self::Panicked => 3,
        }
    }

    const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Cancelled),
            2 => Some(Self::TimeBudget),
            3 => Some(Self::Panicked),
            _ => None,
        }
    }
}

/// Search metrics written by one worker.
///
/// Uses atomics for lock-free access while the worker runs.
#[derive(Debug, Default)]
pub struct WorkerMetrics {
    /// Completed generations
    generations: AtomicU64,

    /// Wall-clock time of the latest generation, in nanoseconds
    last_generation_nanos: AtomicU64,

    /// Time since the worker started, in nanoseconds
    elapsed_nanos: AtomicU64,

    /// [`ExitReason`] code, 0 while running
    exit: AtomicU8,
}

impl WorkerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed generation.
    pub fn record_generation(&self, duration: Duration, elapsed: Duration) {
        self.generations.fetch_add(1, Ordering::Relaxed);
        self.last_generation_nanos
            .store(duration.as_nanos() as u64, Ordering::Relaxed);
        self.elapsed_nanos
            .store(elapsed.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn record_exit(&self, reason: ExitReason) {
        self.exit.store(reason.code(), Ordering::Release);
    }

    pub fn generations(&self) -> u64 {
        self.generations.load(Ordering::Relaxed)
    }

    pub fn last_generation(&self) -> Duration {
        Duration::from_nanos(self.last_generation_nanos.load(Ordering::Relaxed))
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::Relaxed))
    }

    /// `None` while the worker is still searching.
    pub fn exit_reason(&self) -> Option<ExitReason> {
        ExitReason::from_code(self.exit.load(Ordering::Acquire))
    }

    /// Creates a snapshot of all metrics for display/logging.
    ///
    /// Note: fields are read individually, so the snapshot may mix values
    /// from consecutive generations.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            generations: self.generations(),
            last_generation: self.last_generation(),
            elapsed: self.elapsed(),
            exit: self.exit_reason(),
        }
    }
}

/// Snapshot of worker metrics at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub generations: u64,
    pub last_generation: Duration,
    pub elapsed: Duration,
    pub exit: Option<ExitReason>,
}

impl MetricsSnapshot {
    /// Average generations per second over the worker's lifetime.
    pub fn generations_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.generations as f64 / secs
        }
    }
}
