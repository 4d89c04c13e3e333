//! UdpSink - UDP fire-and-forget datagram transmission

use contracts::{PacketSink, TelemetryError};
use tokio::net::UdpSocket;
use tracing::{debug, instrument, trace};

/// Sink that emits datagrams over UDP
///
/// Binds an ephemeral local port and connects to the target once. Every
/// `send` is a single bounded attempt: no retry, no acknowledgment, no
/// delivery tracking.
pub struct UdpSink {
    name: String,
    socket: Option<UdpSocket>,
}

impl UdpSink {
    /// Create a new UdpSink connected to `host:port`
    ///
    /// # Errors
    /// Returns [`TelemetryError::TransportInit`] when the local bind or the
    /// connect fails; callers treat this as fatal at startup.
    #[instrument(name = "udp_sink_connect", skip(name))]
    pub async fn connect(
        name: impl Into<String>,
        host: &str,
        port: u16,
    ) -> Result<Self, TelemetryError> {
        let name = name.into();
        let target = format!("{host}:{port}");

        // Bind to any available port
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| TelemetryError::transport_init(&target, format!("bind failed: {e}")))?;
        socket
            .connect((host, port))
            .await
            .map_err(|e| TelemetryError::transport_init(&target, format!("connect failed: {e}")))?;

        debug!(sink = %name, target = %target, "UdpSink connected");

        Ok(Self {
            name,
            socket: Some(socket),
        })
    }

    fn socket(&self) -> Result<&UdpSocket, TelemetryError> {
        self.socket
            .as_ref()
            .ok_or_else(|| TelemetryError::transport_send(&self.name, "socket closed"))
    }
}

impl PacketSink for UdpSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&mut self, datagram: &[u8]) -> Result<(), TelemetryError> {
        let socket = self.socket()?;
        let sent = socket
            .send(datagram)
            .await
            .map_err(|e| TelemetryError::transport_send(&self.name, e.to_string()))?;
        trace!(sink = %self.name, bytes = sent, "datagram sent");
        Ok(())
    }

    #[instrument(name = "udp_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), TelemetryError> {
        self.socket = None;
        debug!(sink = %self.name, "UdpSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_udp_sink_create() {
        let sink = UdpSink::connect("test_udp", "127.0.0.1", 19999).await;
        // Should succeed even if no receiver (UDP doesn't care)
        assert!(sink.is_ok());
    }

    #[tokio::test]
    async fn test_udp_sink_send_without_receiver() {
        let mut sink = UdpSink::connect("test_udp", "127.0.0.1", 19998)
            .await
            .unwrap();
        // Fire-and-forget: no receiver is not an error
        let result = sink.send(&[0x05, 0xD2, 0x04, 0x01, 0x02]).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_udp_sink_delivers_datagram() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut sink = UdpSink::connect("test_udp", "127.0.0.1", port)
            .await
            .unwrap();
        let payload = [0x05, 0xD2, 0x04, 0x01, 0x02];
        sink.send(&payload).await.unwrap();

        let mut buf = [0u8; 64];
        let received = receiver.recv(&mut buf).await.unwrap();
        assert_eq!(&buf[..received], &payload);
    }

    #[tokio::test]
    async fn test_udp_sink_send_after_close_fails() {
        let mut sink = UdpSink::connect("test_udp", "127.0.0.1", 19997)
            .await
            .unwrap();
        sink.close().await.unwrap();
        let result = sink.send(&[0x00]).await;
        assert!(result.is_err());
    }
}
