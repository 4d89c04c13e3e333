//! Device fleet supervisor

use std::sync::Arc;
use std::time::Duration;

use contracts::{FleetBlueprint, TelemetryError, TransportMode};
use tracing::{debug, info, instrument, warn};
use transport::{LogSink, UdpSink};

use crate::metrics::WorkerMetrics;
use crate::worker::{DeviceWorker, WorkerContext};

/// Grace period for workers to exit during shutdown
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Runtime limits applied to every worker
#[derive(Debug, Clone, Copy, Default)]
pub struct FleetLimits {
    /// Per-device packet budget (None = unbounded)
    pub max_packets: Option<u64>,
}

/// Device fleet supervisor
///
/// Spawns one worker per configured device, provides unified lifecycle
/// control over all of them.
pub struct DeviceFleet {
    workers: Vec<DeviceWorker>,
}

impl DeviceFleet {
    /// Spawn one worker per device in the blueprint
    ///
    /// Every worker gets its own sink; a sink that cannot be constructed
    /// aborts the whole start, the fleet never comes up partially.
    #[instrument(
        name = "fleet_start",
        skip(blueprint, limits),
        fields(devices = blueprint.devices.len())
    )]
    pub async fn start(
        blueprint: &FleetBlueprint,
        limits: FleetLimits,
    ) -> Result<Self, TelemetryError> {
        let mut workers = Vec::with_capacity(blueprint.devices.len());

        for device in &blueprint.devices {
            let sink_name = format!("device-{}", device.id);
            let ctx = WorkerContext {
                device: device.clone(),
                schema: blueprint.schema,
                interval: blueprint.interval_for(device),
                seed: blueprint.seed_for(device),
                max_packets: limits.max_packets,
            };

            let worker = match blueprint.transmit.mode {
                TransportMode::Udp => {
                    let sink = UdpSink::connect(
                        sink_name,
                        &blueprint.transmit.host,
                        blueprint.transmit.port,
                    )
                    .await?;
                    DeviceWorker::spawn(ctx, sink)
                }
                TransportMode::Log => DeviceWorker::spawn(ctx, LogSink::new(sink_name)),
            };

            workers.push(worker);
        }

        observability::metrics::set_fleet_devices(workers.len());
        info!(
            count = workers.len(),
            target = %blueprint.transmit.target(),
            mode = ?blueprint.transmit.mode,
            "device fleet started"
        );

        Ok(Self { workers })
    }

    /// Number of devices in the fleet
    pub fn device_count(&self) -> usize {
        self.workers.len()
    }

    /// Whether any worker is still running
    pub fn any_running(&self) -> bool {
        self.workers.iter().any(DeviceWorker::is_running)
    }

    /// Per-device metrics handles, paired with device IDs
    pub fn monitors(&self) -> Vec<(u16, Arc<WorkerMetrics>)> {
        self.workers
            .iter()
            .map(|worker| (worker.device_id(), worker.metrics()))
            .collect()
    }

    /// Signal every worker to stop (does not wait)
    pub fn stop_all(&self) {
        info!(count = self.workers.len(), "stopping all device workers");
        for worker in &self.workers {
            worker.stop();
        }
    }

    /// Wait until every worker has exited on its own
    ///
    /// Only returns without outside help when workers are bounded by a
    /// packet budget; unbounded fleets exit after `stop_all`.
    pub async fn wait_idle(&mut self) {
        for worker in &mut self.workers {
            worker.wait().await;
        }
    }

    /// Stop all workers and wait (bounded) for them to exit
    #[instrument(name = "fleet_shutdown", skip(self))]
    pub async fn shutdown(mut self) {
        self.stop_all();

        for worker in &mut self.workers {
            if tokio::time::timeout(SHUTDOWN_GRACE, worker.wait())
                .await
                .is_err()
            {
                warn!(device_id = worker.device_id(), "worker did not exit in time");
            }
        }
        debug!("device fleet shut down");
    }
}

impl Drop for DeviceFleet {
    fn drop(&mut self) {
        self.stop_all();
    }
}
