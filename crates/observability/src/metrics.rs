//! 发包指标记录模块
//!
//! 基于 metrics facade 记录舰队发包指标，装好 Prometheus recorder 后即可导出。

use metrics::{counter, gauge, histogram};

/// 记录一次成功发包
///
/// 每个 worker 在 sink 发送成功后调用。
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_packet_sent;
///
/// if sink.send(&datagram).await.is_ok() {
///     record_packet_sent(device_id, datagram.len());
/// }
/// ```
pub fn record_packet_sent(device_id: u16, bytes: usize) {
    counter!(
        "nicla_telgen_packets_sent_total",
        "device_id" => device_id.to_string()
    )
    .increment(1);

    counter!(
        "nicla_telgen_bytes_sent_total",
        "device_id" => device_id.to_string()
    )
    .increment(bytes as u64);

    // 报文长度分布，v1/v2 混跑时用于区分流量构成
    histogram!("nicla_telgen_packet_size_bytes").record(bytes as f64);
}

/// 记录一次发送失败
pub fn record_send_error(device_id: u16) {
    counter!(
        "nicla_telgen_send_errors_total",
        "device_id" => device_id.to_string()
    )
    .increment(1);
}

/// 记录一次编码失败
pub fn record_encode_error(device_id: u16) {
    counter!(
        "nicla_telgen_encode_errors_total",
        "device_id" => device_id.to_string()
    )
    .increment(1);
}

/// 记录当前在线设备数
pub fn set_fleet_devices(count: usize) {
    gauge!("nicla_telgen_fleet_devices").set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        // 未安装 recorder 时 metrics 宏应当静默忽略
        record_packet_sent(1234, 46);
        record_send_error(1234);
        record_encode_error(1234);
        set_fleet_devices(3);
    }
}
