//! Client configuration loaded from environment variables.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use planner_core::PlannerSettings;

/// Everything the binary needs before starting a search.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub settings: PlannerSettings,
    pub scenario: PathBuf,
    /// Also write logs to `<dir>/planner.log` when set.
    pub log_dir: Option<PathBuf>,
    /// How often progress is logged while workers run.
    pub report_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            settings: PlannerSettings::default(),
            scenario: default_scenario(),
            log_dir: None,
            report_interval: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PLANNER_THREADS` - Search workers (default: available parallelism)
    /// - `PLANNER_POPULATION` - Survivors per generation (default: 200)
    /// - `PLANNER_MUTATE_CHANCE` - Mutation probability (default: 0.3)
    /// - `PLANNER_INJECTION_RATE` - Fresh paths per generation, as a fraction (default: 0.1)
    /// - `PLANNER_MAX_SECONDS` - Per-worker budget; `0` runs until Ctrl-C (default: 3)
    /// - `PLANNER_SEED` - Base RNG seed for reproducible runs
    /// - `PLANNER_VALIDATED_POINTS` - Samples checked per segment (default: 5)
    /// - `PLANNER_SCENARIO` - Scenario RON file (default: bundled crypt)
    /// - `PLANNER_LOG_DIR` - Directory for `planner.log`
    /// - `PLANNER_REPORT_INTERVAL_MS` - Progress log interval (default: 500)
    ///
    /// Unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let settings = &mut config.settings;

        if let Some(threads) = parse::<usize>(lookup("PLANNER_THREADS")) {
            settings.search_threads = threads;
        }
        if let Some(population) = parse::<usize>(lookup("PLANNER_POPULATION")) {
            settings.population_size = population;
        }
        if let Some(chance) = parse::<f64>(lookup("PLANNER_MUTATE_CHANCE")) {
            settings.mutate_chance = chance;
        }
        if let Some(rate) = parse::<f64>(lookup("PLANNER_INJECTION_RATE")) {
            settings.random_path_injection_rate = rate;
        }
        if let Some(seconds) = parse::<f64>(lookup("PLANNER_MAX_SECONDS")) {
            settings.maximum_generation_time = (seconds.is_finite() && seconds > 0.0)
                .then(|| Duration::from_secs_f64(seconds));
        }
        if let Some(seed) = parse::<u64>(lookup("PLANNER_SEED")) {
            settings.seed = Some(seed);
        }
        if let Some(points) = parse::<usize>(lookup("PLANNER_VALIDATED_POINTS")) {
            settings.validated_intermediate_points = points;
        }

        if let Some(path) = lookup("PLANNER_SCENARIO").filter(|value| !value.is_empty()) {
            config.scenario = PathBuf::from(path);
        }
        config.log_dir = lookup("PLANNER_LOG_DIR")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        if let Some(millis) = parse::<u64>(lookup("PLANNER_REPORT_INTERVAL_MS")) {
            config.report_interval = Duration::from_millis(millis.max(10));
        }

        config
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

fn default_scenario() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../planner/content/data/crypt.ron")
}
