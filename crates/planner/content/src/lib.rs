//! Data-driven scenario definitions.
//!
//! Scenarios describe one planning problem in RON: the walkable workspace,
//! the start point, step and activation ranges, and the reward and relic
//! sites. Loaders turn them into a ready-to-share [`planner_core::Environment`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{LoadResult, Scenario, ScenarioLoader};
