//! Worker metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a single device worker
#[derive(Debug, Default)]
pub struct WorkerMetrics {
    /// Total packets handed to the sink
    packets_sent: AtomicU64,
    /// Total payload bytes handed to the sink
    bytes_sent: AtomicU64,
    /// Total sink send failures
    send_errors: AtomicU64,
    /// Total packets that failed to serialize
    encode_errors: AtomicU64,
}

impl WorkerMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total packets sent
    pub fn packets_sent(&self) -> u64 {
        self.packets_sent.load(Ordering::Relaxed)
    }

    /// Increment packets sent
    pub fn inc_packets_sent(&self) {
        self.packets_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total bytes sent
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::Relaxed)
    }

    /// Add to bytes sent
    pub fn add_bytes_sent(&self, bytes: u64) {
        self.bytes_sent.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Get send error count
    pub fn send_errors(&self) -> u64 {
        self.send_errors.load(Ordering::Relaxed)
    }

    /// Increment send error count
    pub fn inc_send_errors(&self) {
        self.send_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get encode error count
    pub fn encode_errors(&self) -> u64 {
        self.encode_errors.load(Ordering::Relaxed)
    }

    /// Increment encode error count
    pub fn inc_encode_errors(&self) {
        self.encode_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            packets_sent: self.packets_sent(),
            bytes_sent: self.bytes_sent(),
            send_errors: self.send_errors(),
            encode_errors: self.encode_errors(),
        }
    }
}

/// Snapshot of worker metrics (for reporting)
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub packets_sent: u64,
    pub bytes_sent: u64,
    pub send_errors: u64,
    pub encode_errors: u64,
}
