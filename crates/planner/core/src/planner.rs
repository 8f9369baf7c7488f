//! Evolutionary search loop.
//!
//! [`PathPlanner::series`] yields an unbounded sequence of [`PathState`]s, one
//! per generation. The loop never terminates on its own; callers stop pulling
//! when their budget runs out.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::PlannerSettings;
use crate::env::Environment;
use crate::generator::PathGenerator;
use crate::geometry::Point;
use crate::score::Scorer;

/// Best path known to one worker after a generation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathState {
    pub points: Vec<Point>,
    pub score: f64,
}

/// Single-threaded planner owning its own randomness.
pub struct PathPlanner {
    generator: PathGenerator,
    scorer: Scorer,
    population_size: usize,
    mutate_chance: f64,
    injected_paths: usize,
}

impl PathPlanner {
    pub fn new(settings: &PlannerSettings, rng: SmallRng) -> Self {
        Self {
            generator: PathGenerator::new(settings, rng),
            scorer: Scorer::new(settings.loot_weights.clone()),
            population_size: settings.population_size.max(1),
            mutate_chance: probability(settings.mutate_chance),
            injected_paths: settings.injected_paths(),
        }
    }

    pub fn seeded(settings: &PlannerSettings, seed: u64) -> Self {
        Self::new(settings, SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy(settings: &PlannerSettings) -> Self {
        Self::new(settings, SmallRng::from_entropy())
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Starts a fresh search over `env`.
    pub fn series(self, env: &Environment) -> PathSeries<'_> {
        PathSeries {
            planner: self,
            env,
            batch: Vec::new(),
            best: None,
            generation: 0,
        }
    }
}

/// Lazy, unbounded sequence of per-generation best paths.
///
/// Reported scores never decrease: the best path found so far is carried into
/// every following batch.
pub struct PathSeries<'a> {
    planner: PathPlanner,
    env: &'a Environment,
    batch: Vec<Vec<Point>>,
    best: Option<PathState>,
    generation: u64,
}

impl PathSeries<'_> {
    /// Completed generations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn best(&self) -> Option<&PathState> {
        self.best.as_ref()
    }

    /// Runs one generation and returns the best path so far.
    pub fn step(&mut self) -> PathState {
        let env = self.env;
        let planner = &mut self.planner;
        let population = planner.population_size;

        if self.batch.is_empty() {
            self.batch = (0..population * 2)
                .map(|_| planner.generator.build_path(env))
                .collect();
        }

        let mut ranked: Vec<(f64, Vec<Point>)> = self
            .batch
            .drain(..)
            .map(|path| (planner.scorer.score(&path, env), path))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.truncate(population);

        // two copies of every survivor, each mutated independently
        let mut next = Vec::with_capacity(ranked.len() * 2 + planner.injected_paths + 1);
        for (_, path) in ranked.iter().chain(&ranked) {
            let child = if planner.generator.rng().gen_bool(planner.mutate_chance) {
                planner.generator.mutate(path, env)
            } else {
                path.clone()
            };
            next.push(child);
        }
        for _ in 0..planner.injected_paths {
            next.push(planner.generator.build_path(env));
        }
        if let Some(best) = &self.best {
            next.push(best.points.clone());
        }

        if let Some((score, path)) = ranked.into_iter().next() {
            let improved = self.best.as_ref().is_none_or(|best| score > best.score);
            if improved {
                self.best = Some(PathState {
                    points: path,
                    score,
                });
            }
        }

        self.batch = next;
        self.generation += 1;

        // ranked is never empty, so best is always set here
        self.best.clone().unwrap_or_else(|| PathState {
            points: Vec::new(),
            score: 0.0,
        })
    }
}

/// Clamps `chance` into `[0, 1]`; NaN disables the roll.
fn probability(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

impl Iterator for PathSeries<'_> {
    type Item = PathState;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tests::{assert_valid_path, walled_env};
    use crate::loot::{LootCategory, LootWeights};
    use crate::oracle::AlwaysValid;
    use crate::relic::Relic;

    fn small_settings() -> PlannerSettings {
        PlannerSettings {
            population_size: 24,
            loot_weights: LootWeights::uniform(1.0),
            ..PlannerSettings::default()
        }
    }

    fn single_site_env() -> Environment {
        Environment::builder()
            .oracle(AlwaysValid)
            .step_range(10.0)
            .activation_radius(5.0)
            .path_length(2)
            .reward_site(Point::new(8.0, 0.0), LootCategory::StandardMonster)
            .build()
            .unwrap()
    }

    #[test]
    fn finds_single_reachable_site() {
        let env = single_site_env();
        let best = PathPlanner::seeded(&small_settings(), 1)
            .series(&env)
            .take(10)
            .last()
            .unwrap();

        assert_eq!(best.score, 1.0);
        assert_valid_path(&best.points, &env);
    }

    #[test]
    fn reported_scores_never_decrease() {
        let env = walled_env(6);
        let states: Vec<PathState> = PathPlanner::seeded(&small_settings(), 5)
            .series(&env)
            .take(40)
            .collect();

        for pair in states.windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }
    }

    #[test]
    fn emitted_paths_are_valid() {
        let env = walled_env(7);
        for state in PathPlanner::seeded(&small_settings(), 9)
            .series(&env)
            .take(25)
        {
            assert_valid_path(&state.points, &env);
            assert_eq!(
                state.score,
                Scorer::new(LootWeights::uniform(1.0)).score(&state.points, &env)
            );
        }
    }

    #[test]
    fn disqualifier_on_the_only_route_scores_zero() {
        let env = Environment::builder()
            .oracle(AlwaysValid)
            .step_range(10.0)
            .activation_radius(5.0)
            .path_length(1)
            .reward_site(Point::new(8.0, 0.0), LootCategory::StandardChest)
            .modifier_site(Point::new(8.0, 0.0), Relic::Warning)
            .build()
            .unwrap();
        let best = PathPlanner::seeded(&small_settings(), 3)
            .series(&env)
            .take(10)
            .last()
            .unwrap();

        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn same_seed_replays_the_same_search() {
        let env = walled_env(5);
        let run = |seed| -> Vec<f64> {
            PathPlanner::seeded(&small_settings(), seed)
                .series(&env)
                .take(15)
                .map(|state| state.score)
                .collect()
        };

        assert_eq!(run(42), run(42));
    }

    fn fan_env() -> Environment {
        Environment::builder()
            .oracle(AlwaysValid)
            .step_range(10.0)
            .activation_radius(2.0)
            .path_length(1)
            .reward_site(Point::new(4.0, 0.0), LootCategory::StandardChest)
            .build()
            .unwrap()
    }

    /// Twenty distinct one-point paths on a circle around the start.
    fn fan() -> Vec<Vec<Point>> {
        (0..20)
            .map(|i| vec![Point::from_polar(f64::from(i) * 0.3, 4.0)])
            .collect()
    }

    fn settings_with_chance(mutate_chance: f64) -> PlannerSettings {
        PlannerSettings {
            population_size: 10,
            mutate_chance,
            random_path_injection_rate: 0.0,
            ..small_settings()
        }
    }

    #[test]
    fn unmutated_survivors_are_duplicated() {
        let env = fan_env();
        let mut series = PathPlanner::seeded(&settings_with_chance(0.0), 2).series(&env);
        series.batch = fan();
        series.step();

        assert_eq!(series.batch.len(), 20);
        for path in &series.batch {
            let copies = series.batch.iter().filter(|other| *other == path).count();
            assert_eq!(copies, 2, "{path:?}");
        }
    }

    #[test]
    fn every_copy_rolls_for_mutation() {
        let env = fan_env();
        let parents = fan();
        let mut series = PathPlanner::seeded(&settings_with_chance(1.0), 2).series(&env);
        series.batch = parents.clone();
        series.step();

        assert_eq!(series.batch.len(), 20);
        for path in &series.batch {
            assert!(!parents.contains(path), "{path:?} carried over unchanged");
            assert_valid_path(path, &env);
        }
    }

    #[test]
    fn non_finite_mutate_chance_is_disabled() {
        let env = single_site_env();
        let planner = PathPlanner::seeded(&settings_with_chance(f64::NAN), 4);
        assert_eq!(planner.mutate_chance, 0.0);
        assert_eq!(
            PathPlanner::seeded(&settings_with_chance(f64::INFINITY), 4).mutate_chance,
            1.0
        );

        let mut series = planner.series(&env);
        for _ in 0..3 {
            series.step();
        }
        assert_eq!(series.generation(), 3);
    }

    #[test]
    fn generation_counter_advances_per_step() {
        let env = single_site_env();
        let mut series = PathPlanner::seeded(&small_settings(), 0).series(&env);
        assert!(series.best().is_none());

        series.step();
        series.step();
        assert_eq!(series.generation(), 2);
        assert!(series.best().is_some());
    }
}
