//! LogSink - logs datagram hex dumps via tracing

use contracts::{PacketSink, TelemetryError};
use tracing::{debug, info, instrument};

/// Sink that logs datagrams instead of transmitting them
///
/// Dry-run transport: each datagram is logged with its length and the full
/// hex dump a wire capture would show.
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Format bytes as a lowercase hex string
fn hex_dump(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

impl PacketSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&mut self, datagram: &[u8]) -> Result<(), TelemetryError> {
        debug!(
            sink = %self.name,
            bytes = datagram.len(),
            payload = %hex_dump(datagram),
            "datagram logged"
        );
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), TelemetryError> {
        info!(sink = %self.name, "LogSink closed");
        Ok(())
    }
}
