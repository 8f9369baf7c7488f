//! Search tuning parameters and their defaults.
use std::time::Duration;

use crate::loot::LootWeights;

/// Invalid tuning values rejected before any worker starts.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("population size must be at least 1")]
    EmptyPopulation,

    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("random path injection rate must be non-negative and finite, got {0}")]
    InvalidInjectionRate(f64),

    #[error("maximum generation time must be positive, got {0:?}")]
    InvalidTimeBudget(Duration),

    #[error("weight for {category} must be non-negative and finite, got {value}")]
    InvalidWeight { category: &'static str, value: f64 },

    #[error("{name} must be at least 1")]
    ZeroAttempts { name: &'static str },
}

/// Planner configuration shared by every search worker.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerSettings {
    /// Number of parallel search workers (clamped to at least 1).
    pub search_threads: usize,
    /// Survivors kept per generation.
    pub population_size: usize,
    /// Probability that each copy of a survivor is mutated.
    pub mutate_chance: f64,
    /// Fresh paths injected per generation, as a fraction of the population.
    pub random_path_injection_rate: f64,
    /// Per-worker wall-clock budget; `None` runs until stopped.
    pub maximum_generation_time: Option<Duration>,
    /// Interior samples checked on every segment (the endpoint is always checked).
    pub validated_intermediate_points: usize,
    /// Radius-shrinking retries for a single free step.
    pub step_attempts: usize,
    /// Retries for a single point-replace mutation.
    pub replace_attempts: usize,
    pub loot_weights: LootWeights,
    /// Base seed; worker `i` uses `seed + i`. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl PlannerSettings {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_POPULATION_SIZE: usize = 200;
    pub const DEFAULT_MUTATE_CHANCE: f64 = 0.3;
    pub const DEFAULT_INJECTION_RATE: f64 = 0.1;
    pub const DEFAULT_MAXIMUM_GENERATION_TIME: Duration = Duration::from_secs(3);
    pub const DEFAULT_VALIDATED_INTERMEDIATE_POINTS: usize = 5;
    pub const DEFAULT_STEP_ATTEMPTS: usize = 1000;
    pub const DEFAULT_REPLACE_ATTEMPTS: usize = 10;

    pub fn new() -> Self {
        Self {
            search_threads: default_search_threads(),
            population_size: Self::DEFAULT_POPULATION_SIZE,
            mutate_chance: Self::DEFAULT_MUTATE_CHANCE,
            random_path_injection_rate: Self::DEFAULT_INJECTION_RATE,
            maximum_generation_time: Some(Self::DEFAULT_MAXIMUM_GENERATION_TIME),
            validated_intermediate_points: Self::DEFAULT_VALIDATED_INTERMEDIATE_POINTS,
            step_attempts: Self::DEFAULT_STEP_ATTEMPTS,
            replace_attempts: Self::DEFAULT_REPLACE_ATTEMPTS,
            loot_weights: LootWeights::default(),
            seed: None,
        }
    }

    /// Effective worker count.
    pub fn thread_count(&self) -> usize {
        self.search_threads.max(1)
    }

    /// Number of fresh paths appended to each generation. Non-finite rates
    /// inject nothing.
    pub fn injected_paths(&self) -> usize {
        let rate = self.random_path_injection_rate;
        if !rate.is_finite() {
            return 0;
        }
        (self.population_size as f64 * rate) as usize
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.population_size == 0 {
            return Err(SettingsError::EmptyPopulation);
        }
        if !(0.0..=1.0).contains(&self.mutate_chance) {
            return Err(SettingsError::ProbabilityOutOfRange {
                name: "mutate chance",
                value: self.mutate_chance,
            });
        }
        if !(self.random_path_injection_rate.is_finite() && self.random_path_injection_rate >= 0.0)
        {
            return Err(SettingsError::InvalidInjectionRate(
                self.random_path_injection_rate,
            ));
        }
        if let Some(budget) = self.maximum_generation_time.filter(Duration::is_zero) {
            return Err(SettingsError::InvalidTimeBudget(budget));
        }
        if self.step_attempts == 0 {
            return Err(SettingsError::ZeroAttempts {
                name: "step attempts",
            });
        }
        if self.replace_attempts == 0 {
            return Err(SettingsError::ZeroAttempts {
                name: "replace attempts",
            });
        }

        let weights = &self.loot_weights;
        for (category, value) in [
            ("high_value_monster", weights.high_value_monster),
            ("standard_monster", weights.standard_monster),
            ("high_value_chest", weights.high_value_chest),
            ("standard_chest", weights.standard_chest),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::InvalidWeight { category, value });
            }
        }

        Ok(())
    }
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self::new()
    }
}

fn default_search_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
