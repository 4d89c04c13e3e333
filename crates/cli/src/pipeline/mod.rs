//! Fleet orchestration module.

mod runner;
mod stats;

pub use runner::{FleetRunner, RunnerConfig};
pub use stats::SimulationStats;
