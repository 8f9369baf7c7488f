//! Errors surfaced by the planner runner.

use thiserror::Error;

use planner_core::{EnvironmentError, SettingsError};

pub type Result<T> = std::result::Result<T, RunnerError>;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("planner is already running; stop it before starting again")]
    AlreadyRunning,

    #[error("planner runner must be started from within a tokio runtime")]
    NoAsyncRuntime,

    #[error("invalid planner settings")]
    InvalidSettings(#[from] SettingsError),

    #[error("invalid planning environment")]
    InvalidEnvironment(#[from] EnvironmentError),

    #[error("search worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
