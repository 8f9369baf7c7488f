//! Expedition planner binary.
//!
//! Loads a scenario, runs the parallel route search until every worker's time
//! budget elapses (or Ctrl-C), then prints the best route as JSON on stdout.
//!
//! # Examples
//!
//! ```bash
//! # Bundled scenario, default settings
//! cargo run -p expedition-planner
//!
//! # Custom scenario, reproducible, run until interrupted
//! PLANNER_SCENARIO=room.ron PLANNER_SEED=7 PLANNER_MAX_SECONDS=0 \
//!     cargo run -p expedition-planner
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::time::{self, MissedTickBehavior};

use expedition_planner::{ClientConfig, PlanReport, logging};
use planner_content::ScenarioLoader;
use planner_runtime::PlannerRunner;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let mut config = ClientConfig::from_env();

    // 2. Setup logging
    let _log_guard = logging::setup_logging(config.log_dir.as_deref())?;

    // 3. Load scenario
    let scenario = ScenarioLoader::load(&config.scenario)
        .with_context(|| format!("Failed to load scenario {}", config.scenario.display()))?;
    if let Some(weights) = scenario.loot_weights.clone() {
        config.settings.loot_weights = weights;
    }
    tracing::info!(
        scenario = %scenario.name,
        path = %config.scenario.display(),
        "Scenario loaded"
    );

    // 4. Start workers
    let mut runner = PlannerRunner::new();
    runner.start(config.settings.clone(), Arc::new(scenario.environment))?;

    // 5. Report progress until the workers finish or the user interrupts
    let mut ticker = time::interval(config.report_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut listening = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !runner.is_running() {
                    break;
                }
                let generations: u64 = runner.metrics().iter().map(|m| m.generations).sum();
                tracing::info!(
                    best_score = ?runner.current_best_score(),
                    generations,
                    "Searching"
                );
            }
            result = &mut ctrl_c, if listening => match result {
                Ok(()) => {
                    tracing::info!("Interrupted, stopping workers");
                    runner.stop();
                    break;
                }
                Err(e) => {
                    tracing::warn!("Failed to listen for Ctrl-C: {}", e);
                    listening = false;
                }
            },
        }
    }

    runner.join().await?;

    // 6. Print result
    let report = PlanReport::collect(scenario.name, &runner);
    tracing::info!(score = ?report.score, points = report.path.len(), "Search finished");
    println!("{}", report.to_json()?);

    Ok(())
}
