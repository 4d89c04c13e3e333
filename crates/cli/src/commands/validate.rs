//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::{FleetBlueprint, SchemaVersion, TransportMode};

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    schema: String,
    target: String,
    mode: String,
    device_count: usize,
    packet_bytes: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    schema: blueprint.schema.to_string(),
                    target: blueprint.transmit.target(),
                    mode: format!("{:?}", blueprint.transmit.mode),
                    device_count: blueprint.devices.len(),
                    packet_bytes: blueprint.schema.packet_len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &FleetBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    // Log mode never touches the network
    if blueprint.transmit.mode == TransportMode::Log {
        warnings.push("Transport mode is 'log' - no UDP traffic will be sent".to_string());
    }

    for device in &blueprint.devices {
        let interval = device.interval_secs.unwrap_or(blueprint.transmit.interval_secs);
        if interval < 0.01 {
            warnings.push(format!(
                "Device {} transmits every {}s - expect heavy traffic",
                device.id, interval
            ));
        }

        if blueprint.schema == SchemaVersion::V1 && device.position.is_some() {
            warnings.push(format!(
                "Device {} has a position configured - ignored under schema v1",
                device.id
            ));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Schema: {}", summary.schema);
            println!("  Target: {} ({})", summary.target, summary.mode);
            println!("  Devices: {}", summary.device_count);
            println!("  Packet size: {} bytes", summary.packet_bytes);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
