//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Nicla Telgen - Synthetic telemetry traffic generator for Nicla fleets
#[derive(Parser, Debug)]
#[command(
    name = "nicla-telgen",
    author,
    version,
    about = "Synthetic Nicla telemetry traffic generator",
    long_about = "Fabricates binary sensor readings for a fleet of simulated Nicla \n\
                  boards and pushes them over UDP.\n\n\
                  Loads a fleet blueprint from configuration, spawns one worker per \n\
                  device, and transmits schema-framed datagrams at a fixed cadence."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "NICLA_TELGEN_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "NICLA_TELGEN_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter derived from the verbosity flags
    ///
    /// `RUST_LOG` wins when set and `--quiet` is absent; otherwise the
    /// default level follows `-v` counting (info, debug, trace).
    pub fn log_filter(&self) -> EnvFilter {
        if self.quiet {
            return EnvFilter::new("warn");
        }

        let default_level = match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the traffic generator
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),

    /// Fabricate and print one packet per device
    Sample(SampleArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "fleet.toml", env = "NICLA_TELGEN_CONFIG")]
    pub config: PathBuf,

    /// Override collector host from configuration
    #[arg(long, env = "NICLA_TELGEN_HOST")]
    pub host: Option<String>,

    /// Override collector port from configuration
    #[arg(long, env = "NICLA_TELGEN_PORT")]
    pub port: Option<u16>,

    /// Maximum packets per device (0 = unlimited)
    #[arg(long, default_value = "0", env = "NICLA_TELGEN_MAX_PACKETS")]
    pub max_packets: u64,

    /// Run duration in seconds (0 = until interrupted)
    #[arg(long, default_value = "0", env = "NICLA_TELGEN_DURATION")]
    pub duration: u64,

    /// Validate configuration and exit without sending traffic
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "NICLA_TELGEN_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "fleet.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "fleet.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show detailed device information
    #[arg(long)]
    pub devices: bool,
}

/// Arguments for the `sample` command
#[derive(Parser, Debug)]
pub struct SampleArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "fleet.toml")]
    pub config: PathBuf,

    /// Random seed for deterministic output (overrides configuration)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
