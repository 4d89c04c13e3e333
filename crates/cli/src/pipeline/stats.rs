//! Fleet run statistics.

use std::sync::Arc;
use std::time::Duration;

use simulator::WorkerMetrics;

/// Per-device counters at the end of a run
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceStats {
    /// Device ID
    pub device_id: u16,

    /// Packets handed to the sink
    pub packets_sent: u64,

    /// Payload bytes handed to the sink
    pub bytes_sent: u64,

    /// Sink send failures
    pub send_errors: u64,

    /// Serialization failures
    pub encode_errors: u64,
}

/// Statistics from a fleet run
#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    /// Total packets handed to sinks
    pub packets_sent: u64,

    /// Total payload bytes handed to sinks
    pub bytes_sent: u64,

    /// Total sink send failures
    pub send_errors: u64,

    /// Total serialization failures
    pub encode_errors: u64,

    /// Total duration of the run
    pub duration: Duration,

    /// Per-device breakdown
    pub devices: Vec<DeviceStats>,
}

impl SimulationStats {
    /// Aggregate worker counters into run statistics
    pub fn from_monitors(monitors: &[(u16, Arc<WorkerMetrics>)], duration: Duration) -> Self {
        let mut stats = Self {
            duration,
            ..Default::default()
        };

        for (device_id, metrics) in monitors {
            let snapshot = metrics.snapshot();

            stats.packets_sent += snapshot.packets_sent;
            stats.bytes_sent += snapshot.bytes_sent;
            stats.send_errors += snapshot.send_errors;
            stats.encode_errors += snapshot.encode_errors;

            stats.devices.push(DeviceStats {
                device_id: *device_id,
                packets_sent: snapshot.packets_sent,
                bytes_sent: snapshot.bytes_sent,
                send_errors: snapshot.send_errors,
                encode_errors: snapshot.encode_errors,
            });
        }

        stats
    }

    /// Calculate packets per second throughput
    pub fn pps(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.packets_sent as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate send error rate as percentage
    #[allow(dead_code)]
    pub fn error_rate(&self) -> f64 {
        let total = self.packets_sent + self.send_errors;
        if total > 0 {
            (self.send_errors as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                      Fleet Statistics                        ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Packets sent: {}", self.packets_sent);
        println!("   ├─ Bytes sent: {}", self.bytes_sent);
        println!("   ├─ Packets/sec: {:.2}", self.pps());
        println!("   ├─ Send errors: {}", self.send_errors);
        println!("   └─ Encode errors: {}", self.encode_errors);

        if !self.devices.is_empty() {
            println!("\n📟 Per Device");
            for (i, device) in self.devices.iter().enumerate() {
                let prefix = if i == self.devices.len() - 1 {
                    "└─"
                } else {
                    "├─"
                };
                println!(
                    "   {} {}: {} packets, {} bytes, {} errors",
                    prefix,
                    device.device_id,
                    device.packets_sent,
                    device.bytes_sent,
                    device.send_errors + device.encode_errors
                );
            }
        }

        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_monitors_aggregates_totals() {
        let first = Arc::new(WorkerMetrics::new());
        first.inc_packets_sent();
        first.inc_packets_sent();
        first.add_bytes_sent(92);

        let second = Arc::new(WorkerMetrics::new());
        second.inc_packets_sent();
        second.add_bytes_sent(77);
        second.inc_send_errors();

        let monitors = vec![(10u16, first), (20u16, second)];
        let stats = SimulationStats::from_monitors(&monitors, Duration::from_secs(2));

        assert_eq!(stats.packets_sent, 3);
        assert_eq!(stats.bytes_sent, 169);
        assert_eq!(stats.send_errors, 1);
        assert_eq!(stats.devices.len(), 2);
        assert_eq!(stats.devices[0].device_id, 10);
        assert_eq!(stats.devices[1].send_errors, 1);
    }

    #[test]
    fn test_pps_computation() {
        let stats = SimulationStats {
            packets_sent: 100,
            duration: Duration::from_secs(10),
            ..Default::default()
        };
        assert!((stats.pps() - 10.0).abs() < 1e-9);

        let empty = SimulationStats::default();
        assert_eq!(empty.pps(), 0.0);
    }
}
