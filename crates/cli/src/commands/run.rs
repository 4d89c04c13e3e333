//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

use contracts::FleetBlueprint;

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::pipeline::{FleetRunner, RunnerConfig};

/// Execute the `run` command
pub async fn run_fleet(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    // Load and parse configuration
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref host) = args.host {
        info!(host = %host, "Overriding collector host from CLI");
        blueprint.transmit.host = host.clone();
    }
    if let Some(port) = args.port {
        info!(port = %port, "Overriding collector port from CLI");
        blueprint.transmit.port = port;
    }

    // Overrides can break an otherwise valid blueprint
    config_loader::ConfigLoader::validate(&blueprint)
        .context("Configuration invalid after CLI overrides")?;

    info!(
        schema = %blueprint.schema,
        target = %blueprint.transmit.target(),
        mode = ?blueprint.transmit.mode,
        devices = blueprint.devices.len(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_fleet_plan(&blueprint);
        return Ok(());
    }

    // Build runner configuration
    let runner_config = RunnerConfig {
        blueprint,
        max_packets: if args.max_packets == 0 {
            None
        } else {
            Some(args.max_packets)
        },
        duration: if args.duration == 0 {
            None
        } else {
            Some(Duration::from_secs(args.duration))
        },
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    // Create and run fleet
    let runner = FleetRunner::new(runner_config);

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting device fleet...");

    // Run fleet with shutdown signal
    tokio::select! {
        result = runner.run() => {
            match result {
                Ok(stats) => {
                    info!(
                        packets_sent = stats.packets_sent,
                        bytes_sent = stats.bytes_sent,
                        duration_secs = stats.duration.as_secs_f64(),
                        pps = format!("{:.2}", stats.pps()),
                        "Fleet run completed"
                    );

                    // Print detailed statistics
                    stats.print_summary();
                }
                Err(e) => {
                    return Err(e).context("Fleet execution failed");
                }
            }
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, stopping fleet...");
        }
    }

    info!("Nicla Telgen finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print fleet plan for dry-run mode
fn print_fleet_plan(blueprint: &FleetBlueprint) {
    println!("\n=== Fleet Plan ===\n");
    println!(
        "Schema: {} ({} bytes per packet)",
        blueprint.schema,
        blueprint.schema.packet_len()
    );
    println!(
        "Target: {} ({:?})",
        blueprint.transmit.target(),
        blueprint.transmit.mode
    );
    match blueprint.seed {
        Some(seed) => println!("Seed: {}", seed),
        None => println!("Seed: OS entropy"),
    }

    println!("\nDevices ({}):", blueprint.devices.len());
    for device in &blueprint.devices {
        let interval = device
            .interval_secs
            .unwrap_or(blueprint.transmit.interval_secs);
        println!(
            "  - {} (type {}) - every {}s",
            device.id, device.nicla_type, interval
        );
    }

    println!();
}
