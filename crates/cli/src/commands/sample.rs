//! `sample` command implementation.
//!
//! 每台设备各出一包：生成、编码、再解码展示，便于核对字节布局。

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use codec::{decode_packet, encode_packet};
use contracts::{FleetBlueprint, TelemetryPacket};
use generator::ReadingGenerator;

use crate::cli::SampleArgs;
use crate::error::CliError;

/// One fabricated packet for JSON output
#[derive(Serialize)]
struct SampleRecord {
    device_id: u16,
    bytes: usize,
    hex: String,
    packet: TelemetryPacket,
}

/// Execute the `sample` command
pub fn run_sample(args: &SampleArgs) -> Result<()> {
    info!(config = %args.config.display(), "Fabricating sample packets");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let records = fabricate_samples(&blueprint, args.seed)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&records).context("Failed to serialize samples")?;
        println!("{}", json);
    } else {
        print_samples(&blueprint, &records);
    }

    Ok(())
}

fn fabricate_samples(
    blueprint: &FleetBlueprint,
    seed_override: Option<u64>,
) -> Result<Vec<SampleRecord>> {
    let mut records = Vec::with_capacity(blueprint.devices.len());

    for device in &blueprint.devices {
        let seed = match seed_override {
            Some(seed) => Some(seed.wrapping_add(u64::from(device.id))),
            None => blueprint.seed_for(device),
        };
        let mut generator = match seed {
            Some(seed) => ReadingGenerator::with_seed(device, blueprint.schema, seed),
            None => ReadingGenerator::new(device, blueprint.schema),
        };

        let packet = generator.next_packet();
        let datagram = encode_packet(&packet, blueprint.schema)
            .with_context(|| format!("Failed to encode packet for device {}", device.id))?;

        // 回读字节流，展示接收方会看到的内容
        let decoded = decode_packet(&datagram, blueprint.schema)
            .with_context(|| format!("Failed to decode packet for device {}", device.id))?;

        records.push(SampleRecord {
            device_id: device.id,
            bytes: datagram.len(),
            hex: datagram.iter().map(|b| format!("{:02x}", b)).collect(),
            packet: decoded,
        });
    }

    Ok(records)
}

fn print_samples(blueprint: &FleetBlueprint, records: &[SampleRecord]) {
    for record in records {
        println!(
            "\n📦 Device {} ({}, {} bytes)",
            record.device_id, blueprint.schema, record.bytes
        );

        for line in hex_lines(&record.hex) {
            println!("   {}", line);
        }

        let fields = &record.packet.fields;
        for (i, field) in fields.iter().enumerate() {
            let prefix = if i == fields.len() - 1 { "└─" } else { "├─" };
            println!("   {} {}: {}", prefix, field.tag.label(), field.value);
        }
    }

    println!();
}

/// Reflow a contiguous hex string into 16-byte rows
fn hex_lines(hex: &str) -> Vec<String> {
    let bytes: Vec<&str> = hex
        .as_bytes()
        .chunks(2)
        .map(|pair| std::str::from_utf8(pair).unwrap_or(""))
        .collect();

    bytes
        .chunks(16)
        .map(|row| row.join(" "))
        .collect()
}
