//! Fleet Demo
//!
//! Demonstrates reading a fleet blueprint, starting the device fleet in
//! log mode, and reporting per-device counters at the end.
//!
//! Run with: cargo run --bin fleet_demo [config_path]

use std::path::PathBuf;
use std::time::Duration;

use config_loader::{ConfigFormat, ConfigLoader};
use contracts::{FleetBlueprint, TransportMode};
use simulator::{DeviceFleet, FleetLimits};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const FALLBACK_FLEET: &str = r#"
schema = "v2"
seed = 99

[transmit]
mode = "log"
interval_secs = 0.2

[[devices]]
id = 101
battery_range = [60, 95]
[devices.position]
latitude = [59.3, 59.4]
longitude = [17.9, 18.1]
altitude = [5.0, 60.0]

[[devices]]
id = 102
tag_class = "random"
[devices.position]
latitude = 59.3293
longitude = 18.0686
altitude = 28.0
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Fleet Demo");

    // ==== Stage 1: Load blueprint ====
    let mut blueprint = load_blueprint()?;
    info!(
        schema = %blueprint.schema,
        devices = blueprint.devices.len(),
        "Blueprint loaded"
    );

    // ==== Stage 2: Force log mode so the demo needs no collector ====
    if blueprint.transmit.mode != TransportMode::Log {
        info!("Switching transport to log mode for the demo");
        blueprint.transmit.mode = TransportMode::Log;
    }

    // ==== Stage 3: Run the fleet for a bounded number of packets ====
    let mut fleet = DeviceFleet::start(
        &blueprint,
        FleetLimits {
            max_packets: Some(10),
        },
    )
    .await?;
    info!(devices = fleet.device_count(), "Fleet started");

    tokio::time::timeout(Duration::from_secs(30), fleet.wait_idle()).await?;

    // ==== Stage 4: Report per-device counters ====
    for (device_id, metrics) in fleet.monitors() {
        let snapshot = metrics.snapshot();
        info!(
            device_id,
            packets = snapshot.packets_sent,
            bytes = snapshot.bytes_sent,
            errors = snapshot.send_errors + snapshot.encode_errors,
            "Device finished"
        );
    }

    fleet.shutdown().await;
    info!("Fleet Demo complete");
    Ok(())
}

fn load_blueprint() -> Result<FleetBlueprint, Box<dyn std::error::Error>> {
    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!(path = %path.display(), "Loading fleet blueprint");
            Ok(ConfigLoader::load_from_path(path.as_path())?)
        }
        None => {
            info!("No config path given, using built-in demo fleet");
            Ok(ConfigLoader::load_from_str(FALLBACK_FLEET, ConfigFormat::Toml)?)
        }
    }
}
