//! Route planning for expedition-style loot collection.
//!
//! `planner-core` holds the pure search logic: the environment snapshot, the
//! order-sensitive [`score::Scorer`], path construction and mutation, and the
//! evolutionary [`planner::PathPlanner`]. Nothing here performs I/O or spawns
//! threads; the runtime crate drives many planners in parallel.
pub mod config;
pub mod env;
pub mod generator;
pub mod geometry;
pub mod loot;
pub mod oracle;
pub mod planner;
pub mod relic;
pub mod score;

pub use config::{PlannerSettings, SettingsError};
pub use env::{Environment, EnvironmentBuilder, EnvironmentError};
pub use generator::PathGenerator;
pub use geometry::Point;
pub use loot::{LootCategory, LootClass, LootWeights, RewardSite};
pub use oracle::{AlwaysValid, ValidityGrid, ValidityOracle};
pub use planner::{PathPlanner, PathSeries, PathState};
pub use relic::{Contribution, ModifierSite, Relic, RelicTarget};
pub use score::Scorer;
