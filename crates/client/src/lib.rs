//! Command-line host for the expedition route planner.
//!
//! # Architecture
//!
//! ```text
//! expedition-planner (composition root)
//!   ├─→ ClientConfig   (environment / .env)
//!   ├─→ ScenarioLoader (RON scenario → Environment)
//!   ├─→ PlannerRunner  (parallel search workers)
//!   └─→ PlanReport     (JSON on stdout)
//! ```

pub mod config;
pub mod logging;
pub mod report;

pub use config::ClientConfig;
pub use report::PlanReport;
