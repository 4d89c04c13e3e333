//! Fleet runner - owns the fleet lifecycle for the `run` command.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::FleetBlueprint;
use simulator::{DeviceFleet, FleetLimits};
use tracing::info;

use super::SimulationStats;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// The fleet blueprint configuration
    pub blueprint: FleetBlueprint,

    /// Per-device packet budget (None = unlimited)
    pub max_packets: Option<u64>,

    /// Run duration (None = until interrupted)
    pub duration: Option<Duration>,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main fleet runner
pub struct FleetRunner {
    config: RunnerConfig,
}

impl FleetRunner {
    /// Create a new runner with the given configuration
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run the fleet to completion
    pub async fn run(self) -> Result<SimulationStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        let limits = FleetLimits {
            max_packets: self.config.max_packets,
        };

        let mut fleet = DeviceFleet::start(blueprint, limits)
            .await
            .context("Failed to start device fleet")?;
        let monitors = fleet.monitors();

        info!(
            devices = fleet.device_count(),
            max_packets = ?self.config.max_packets,
            duration = ?self.config.duration,
            "Fleet running"
        );

        // Workers drain on their own only under a packet budget; otherwise
        // the duration limit (or the caller dropping us) ends the run.
        match self.config.duration {
            Some(limit) => {
                if tokio::time::timeout(limit, fleet.wait_idle()).await.is_err() {
                    info!(duration_secs = limit.as_secs(), "Run duration elapsed");
                }
            }
            None => fleet.wait_idle().await,
        }

        let stats = SimulationStats::from_monitors(&monitors, start_time.elapsed());

        fleet.shutdown().await;

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            pps = format!("{:.2}", stats.pps()),
            "Fleet shutdown complete"
        );

        Ok(stats)
    }
}
