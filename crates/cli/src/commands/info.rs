//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::{FleetBlueprint, GeoPosition, TagClassPolicy};

use crate::cli::InfoArgs;
use crate::error::CliError;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    schema: String,
    packet_bytes: usize,
    transmit: TransmitInfo,
    devices: Vec<DeviceInfo>,
}

#[derive(Serialize)]
struct TransmitInfo {
    host: String,
    port: u16,
    mode: String,
    interval_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Serialize)]
struct DeviceInfo {
    id: u16,
    nicla_type: u8,
    tag_class: String,
    battery_range: [u8; 2],
    interval_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<GeoPosition>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&blueprint);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint, args);
    }

    Ok(())
}

fn build_config_info(blueprint: &FleetBlueprint) -> ConfigInfo {
    let devices = blueprint
        .devices
        .iter()
        .map(|d| DeviceInfo {
            id: d.id,
            nicla_type: d.nicla_type,
            tag_class: describe_tag_class(d.tag_class),
            battery_range: d.battery_range,
            interval_secs: d.interval_secs.unwrap_or(blueprint.transmit.interval_secs),
            position: d.position,
        })
        .collect();

    ConfigInfo {
        schema: blueprint.schema.to_string(),
        packet_bytes: blueprint.schema.packet_len(),
        transmit: TransmitInfo {
            host: blueprint.transmit.host.clone(),
            port: blueprint.transmit.port,
            mode: format!("{:?}", blueprint.transmit.mode),
            interval_secs: blueprint.transmit.interval_secs,
            seed: blueprint.seed,
        },
        devices,
    }
}

fn describe_tag_class(policy: TagClassPolicy) -> String {
    match policy {
        TagClassPolicy::Random => "random".to_string(),
        TagClassPolicy::Fixed(value) => format!("fixed {}", value),
    }
}

fn describe_position(position: Option<&GeoPosition>) -> String {
    match position {
        None => "none".to_string(),
        Some(GeoPosition::Fixed {
            latitude,
            longitude,
            altitude,
        }) => format!("{:.4}°, {:.4}°, {:.0}m", latitude, longitude, altitude),
        Some(GeoPosition::Ranged {
            latitude,
            longitude,
            altitude,
        }) => format!(
            "lat {:?}, lon {:?}, alt {:?}",
            latitude, longitude, altitude
        ),
    }
}

fn print_config_info(blueprint: &FleetBlueprint, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Nicla Telgen Configuration                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // Transmit info
    println!("📡 Transmit");
    println!(
        "   ├─ Schema: {} ({} bytes per packet)",
        blueprint.schema,
        blueprint.schema.packet_len()
    );
    println!(
        "   ├─ Target: {} ({:?})",
        blueprint.transmit.target(),
        blueprint.transmit.mode
    );
    println!("   ├─ Interval: {}s", blueprint.transmit.interval_secs);
    match blueprint.seed {
        Some(seed) => println!("   └─ Seed: {}", seed),
        None => println!("   └─ Seed: OS entropy"),
    }

    // Devices
    println!("\n📟 Devices ({})", blueprint.devices.len());
    for (i, device) in blueprint.devices.iter().enumerate() {
        let is_last = i == blueprint.devices.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        println!("   {} {} (type {})", prefix, device.id, device.nicla_type);

        if args.devices {
            println!(
                "   {}  ├─ tagClass: {}",
                child_prefix,
                describe_tag_class(device.tag_class)
            );
            println!(
                "   {}  ├─ Battery: {}-{}%",
                child_prefix, device.battery_range[0], device.battery_range[1]
            );
            match device.interval_secs {
                Some(interval) => {
                    println!("   {}  ├─ Interval: {}s (override)", child_prefix, interval)
                }
                None => println!(
                    "   {}  ├─ Interval: {}s",
                    child_prefix, blueprint.transmit.interval_secs
                ),
            }
            println!(
                "   {}  └─ Position: {}",
                child_prefix,
                describe_position(device.position.as_ref())
            );
        }
    }

    println!();
}
