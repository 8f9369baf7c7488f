//! Scenario loader.
//!
//! A scenario file holds everything needed to build an [`Environment`]:
//!
//! ```ron
//! (
//!     name: "flooded crypt",
//!     grid: Some((
//!         cell_size: 1.0,
//!         rows: ["....#", "....."],
//!     )),
//!     start: (x: 0.5, y: 0.5),
//!     step_range: 4.0,
//!     activation_radius: 1.5,
//!     path_length: 6,
//!     rewards: [(position: (x: 3.5, y: 1.5), category: HighValueChest)],
//!     relics: [(position: (x: 1.5, y: 0.5), relic: LogbookChest)],
//! )
//! ```
//!
//! Without a `grid`, every finite point is walkable.

use std::path::Path;

use anyhow::Context;
use planner_core::{
    AlwaysValid, Environment, LootWeights, ModifierSite, Point, RewardSite, ValidityGrid,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Walkable workspace as text rows; `.` is walkable.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridRon {
    #[serde(default = "default_cell_size")]
    cell_size: f64,
    #[serde(default)]
    origin: Point,
    rows: Vec<String>,
}

fn default_cell_size() -> f64 {
    1.0
}

/// Scenario structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioRon {
    #[serde(default)]
    name: String,
    #[serde(default)]
    grid: Option<GridRon>,
    #[serde(default)]
    start: Point,
    step_range: f64,
    activation_radius: f64,
    path_length: usize,
    #[serde(default)]
    rewards: Vec<RewardSite>,
    #[serde(default)]
    relics: Vec<ModifierSite>,
    #[serde(default)]
    weights: Option<LootWeights>,
}

/// A loaded planning problem.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub environment: Environment,
    /// Category weights overriding the planner defaults, if the file sets them.
    pub loot_weights: Option<LootWeights>,
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    /// Parse a scenario from RON text.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let data: ScenarioRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let builder = Environment::builder()
            .start_point(data.start)
            .step_range(data.step_range)
            .activation_radius(data.activation_radius)
            .path_length(data.path_length)
            .reward_sites(data.rewards)
            .modifier_sites(data.relics);

        let builder = match data.grid {
            Some(grid) => {
                let oracle = ValidityGrid::from_rows(&grid.rows)?
                    .with_cell_size(grid.cell_size)?
                    .with_origin(grid.origin);
                builder.oracle(oracle)
            }
            None => builder.oracle(AlwaysValid),
        };

        Ok(Scenario {
            name: data.name,
            environment: builder.build()?,
            loot_weights: data.weights,
        })
    }
}
