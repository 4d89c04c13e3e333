//! # Simulator
//!
//! Device fleet simulation module.
//!
//! Responsibilities:
//! - Spawn one async worker per configured device
//! - Generate randomized readings and encode them per schema
//! - Push datagrams through the configured sink at a fixed interval
//! - Expose per-worker counters for reporting
//!
//! ## Usage Example
//!
//! ```ignore
//! use simulator::{DeviceFleet, FleetLimits};
//!
//! let fleet = DeviceFleet::start(&blueprint, FleetLimits::default()).await?;
//!
//! tokio::signal::ctrl_c().await?;
//! fleet.shutdown().await;
//! ```

mod fleet;
mod metrics;
mod worker;

// Re-exports
pub use fleet::{DeviceFleet, FleetLimits};
pub use metrics::{MetricsSnapshot, WorkerMetrics};
pub use worker::{DeviceWorker, WorkerContext};
