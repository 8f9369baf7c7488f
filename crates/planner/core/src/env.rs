//! Immutable description of one optimization problem.
//!
//! An [`Environment`] is built once per search session from the caller's
//! world state and never mutated afterwards, so it can be shared between
//! workers behind an `Arc` without synchronization.

use std::fmt;
use std::sync::Arc;

use crate::geometry::Point;
use crate::loot::{LootCategory, RewardSite};
use crate::oracle::ValidityOracle;
use crate::relic::{ModifierSite, Relic};

/// Configuration problems detected while building an environment.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EnvironmentError {
    #[error("environment requires a validity oracle")]
    MissingOracle,

    #[error("step range must be positive and finite, got {0}")]
    InvalidStepRange(f64),

    #[error("activation radius must be non-negative and finite, got {0}")]
    InvalidActivationRadius(f64),

    #[error("start point must be finite, got ({x}, {y})")]
    InvalidStartPoint { x: f64, y: f64 },

    #[error("validity grid has no cells")]
    EmptyGrid,

    #[error("validity grid expects {expected} cells, got {actual}")]
    GridSizeMismatch { expected: usize, actual: usize },

    #[error("validity grid row {row} has {actual} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("grid cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),
}

/// Search problem instance shared read-only by every worker.
#[derive(Clone)]
pub struct Environment {
    reward_sites: Vec<RewardSite>,
    modifier_sites: Vec<ModifierSite>,
    step_range: f64,
    activation_radius: f64,
    path_length: usize,
    start_point: Point,
    oracle: Arc<dyn ValidityOracle>,
}

impl Environment {
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::new()
    }

    pub fn reward_sites(&self) -> &[RewardSite] {
        &self.reward_sites
    }

    pub fn modifier_sites(&self) -> &[ModifierSite] {
        &self.modifier_sites
    }

    /// Maximum distance between consecutive action points.
    pub fn step_range(&self) -> f64 {
        self.step_range
    }

    /// Distance threshold for both collection and relic activation.
    pub fn activation_radius(&self) -> f64 {
        self.activation_radius
    }

    /// Number of action points in every candidate path.
    pub fn path_length(&self) -> usize {
        self.path_length
    }

    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn is_valid(&self, point: Point) -> bool {
        self.oracle.is_valid(point)
    }

    pub fn oracle(&self) -> &Arc<dyn ValidityOracle> {
        &self.oracle
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("reward_sites", &self.reward_sites.len())
            .field("modifier_sites", &self.modifier_sites.len())
            .field("step_range", &self.step_range)
            .field("activation_radius", &self.activation_radius)
            .field("path_length", &self.path_length)
            .field("start_point", &self.start_point)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Environment`]; validation happens in [`EnvironmentBuilder::build`].
pub struct EnvironmentBuilder {
    reward_sites: Vec<RewardSite>,
    modifier_sites: Vec<ModifierSite>,
    step_range: f64,
    activation_radius: f64,
    path_length: usize,
    start_point: Point,
    oracle: Option<Arc<dyn ValidityOracle>>,
}

impl EnvironmentBuilder {
    fn new() -> Self {
        Self {
            reward_sites: Vec::new(),
            modifier_sites: Vec::new(),
            step_range: 1.0,
            activation_radius: 0.0,
            path_length: 0,
            start_point: Point::ORIGIN,
            oracle: None,
        }
    }

    pub fn start_point(mut self, start_point: Point) -> Self {
        self.start_point = start_point;
        self
    }

    pub fn step_range(mut self, step_range: f64) -> Self {
        self.step_range = step_range;
        self
    }

    pub fn activation_radius(mut self, activation_radius: f64) -> Self {
        self.activation_radius = activation_radius;
        self
    }

    pub fn path_length(mut self, path_length: usize) -> Self {
        self.path_length = path_length;
        self
    }

    pub fn reward_site(mut self, position: Point, category: LootCategory) -> Self {
        self.reward_sites.push(RewardSite::new(position, category));
        self
    }

    pub fn reward_sites(mut self, sites: impl IntoIterator<Item = RewardSite>) -> Self {
        self.reward_sites.extend(sites);
        self
    }

    pub fn modifier_site(mut self, position: Point, relic: Relic) -> Self {
        self.modifier_sites.push(ModifierSite::new(position, relic));
        self
    }

    pub fn modifier_sites(mut self, sites: impl IntoIterator<Item = ModifierSite>) -> Self {
        self.modifier_sites.extend(sites);
        self
    }

    pub fn oracle(mut self, oracle: impl ValidityOracle + 'static) -> Self {
        self.oracle = Some(Arc::new(oracle));
        self
    }

    /// Uses an oracle that is already shared with the caller.
    pub fn shared_oracle(mut self, oracle: Arc<dyn ValidityOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn build(self) -> Result<Environment, EnvironmentError> {
        let oracle = self.oracle.ok_or(EnvironmentError::MissingOracle)?;

        if !(self.step_range.is_finite() && self.step_range > 0.0) {
            return Err(EnvironmentError::InvalidStepRange(self.step_range));
        }
        if !(self.activation_radius.is_finite() && self.activation_radius >= 0.0) {
            return Err(EnvironmentError::InvalidActivationRadius(
                self.activation_radius,
            ));
        }
        if !self.start_point.is_finite() {
            return Err(EnvironmentError::InvalidStartPoint {
                x: self.start_point.x,
                y: self.start_point.y,
            });
        }

        Ok(Environment {
            reward_sites: self.reward_sites,
            modifier_sites: self.modifier_sites,
            step_range: self.step_range,
            activation_radius: self.activation_radius,
            path_length: self.path_length,
            start_point: self.start_point,
            oracle,
        })
    }
}
