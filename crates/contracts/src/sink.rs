//! PacketSink trait - Transport output interface
//!
//! Defines the abstract interface for datagram sinks.

use crate::TelemetryError;

/// Datagram output trait
///
/// All transport implementations must implement this trait. `send` makes a
/// single bounded transmit attempt; implementations never retry and never
/// track delivery.
#[trait_variant::make(PacketSink: Send)]
pub trait LocalPacketSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Transmit one encoded packet
    ///
    /// # Errors
    /// Returns the transmit error (should include context)
    async fn send(&mut self, datagram: &[u8]) -> Result<(), TelemetryError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), TelemetryError>;
}
