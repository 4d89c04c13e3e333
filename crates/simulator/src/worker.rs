//! 设备工作器
//!
//! 每台模拟设备对应一个独立的异步任务，按固定间隔生成并发送数据包。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use codec::encode_packet;
use contracts::{DeviceConfig, PacketSink, SchemaVersion};
use generator::ReadingGenerator;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use crate::metrics::WorkerMetrics;

/// 工作器运行上下文
#[derive(Debug, Clone)]
pub struct WorkerContext {
    /// 设备配置
    pub device: DeviceConfig,

    /// 报文 schema 版本
    pub schema: SchemaVersion,

    /// 发送间隔
    pub interval: Duration,

    /// 随机种子 (None 表示取系统熵)
    pub seed: Option<u64>,

    /// 发包上限 (None 表示不限)
    pub max_packets: Option<u64>,
}

/// 设备工作器句柄
///
/// 持有后台任务的控制权：停止标志、指标和 join 句柄。
pub struct DeviceWorker {
    device_id: u16,
    running: Arc<AtomicBool>,
    metrics: Arc<WorkerMetrics>,
    handle: Option<JoinHandle<()>>,
}

impl DeviceWorker {
    /// 启动一个设备工作器
    ///
    /// 任务立即开始发包，直到 `stop()` 被调用或达到发包上限。
    /// 发送失败只计数并告警，不会终止任务。
    pub fn spawn<S>(ctx: WorkerContext, mut sink: S) -> Self
    where
        S: PacketSink + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let metrics = Arc::new(WorkerMetrics::new());
        let device_id = ctx.device.id;

        let loop_running = running.clone();
        let loop_metrics = metrics.clone();

        let handle = tokio::spawn(async move {
            let mut generator = match ctx.seed {
                Some(seed) => ReadingGenerator::with_seed(&ctx.device, ctx.schema, seed),
                None => ReadingGenerator::new(&ctx.device, ctx.schema),
            };
            let mut sent: u64 = 0;

            debug!(
                device_id = ctx.device.id,
                schema = %ctx.schema,
                interval_ms = ctx.interval.as_millis() as u64,
                sink = sink.name(),
                "device worker started"
            );

            while loop_running.load(Ordering::Relaxed) {
                let packet = generator.next_packet();

                match encode_packet(&packet, ctx.schema) {
                    Ok(datagram) => match sink.send(&datagram).await {
                        Ok(()) => {
                            sent += 1;
                            loop_metrics.inc_packets_sent();
                            loop_metrics.add_bytes_sent(datagram.len() as u64);
                            observability::metrics::record_packet_sent(
                                ctx.device.id,
                                datagram.len(),
                            );
                            trace!(
                                device_id = ctx.device.id,
                                bytes = datagram.len(),
                                "packet sent"
                            );
                        }
                        Err(e) => {
                            loop_metrics.inc_send_errors();
                            observability::metrics::record_send_error(ctx.device.id);
                            warn!(device_id = ctx.device.id, error = %e, "send failed");
                        }
                    },
                    Err(e) => {
                        // 不该发生：蓝图校验过的设备只会生成合法字段组合
                        loop_metrics.inc_encode_errors();
                        observability::metrics::record_encode_error(ctx.device.id);
                        error!(device_id = ctx.device.id, error = %e, "packet encoding failed");
                    }
                }

                if let Some(max) = ctx.max_packets {
                    if sent >= max {
                        debug!(device_id = ctx.device.id, sent, "packet budget reached");
                        break;
                    }
                }

                tokio::time::sleep(ctx.interval).await;
            }

            if let Err(e) = sink.close().await {
                debug!(device_id = ctx.device.id, error = %e, "sink close failed");
            }

            loop_running.store(false, Ordering::SeqCst);
            debug!(device_id = ctx.device.id, sent, "device worker stopped");
        });

        Self {
            device_id,
            running,
            metrics,
            handle: Some(handle),
        }
    }

    /// 设备 ID
    pub fn device_id(&self) -> u16 {
        self.device_id
    }

    /// 任务是否仍在运行
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// 共享指标实例
    pub fn metrics(&self) -> Arc<WorkerMetrics> {
        self.metrics.clone()
    }

    /// 请求任务停止（不等待）
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// 等待任务退出
    ///
    /// 可在超时取消后安全地再次调用。
    pub async fn wait(&mut self) {
        if let Some(handle) = self.handle.as_mut() {
            let _ = handle.await;
            self.handle = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use contracts::{TagClassPolicy, TelemetryError};

    /// 把所有数据报收进内存，供断言使用
    #[derive(Clone, Default)]
    struct CollectingSink {
        datagrams: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl PacketSink for CollectingSink {
        fn name(&self) -> &str {
            "collect"
        }

        async fn send(&mut self, datagram: &[u8]) -> Result<(), TelemetryError> {
            self.datagrams.lock().unwrap().push(datagram.to_vec());
            Ok(())
        }

        async fn close(&mut self) -> Result<(), TelemetryError> {
            Ok(())
        }
    }

    /// 每次发送都失败的 sink
    struct FailingSink;

    impl PacketSink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        async fn send(&mut self, _datagram: &[u8]) -> Result<(), TelemetryError> {
            Err(TelemetryError::transport_send("failing", "simulated outage"))
        }

        async fn close(&mut self) -> Result<(), TelemetryError> {
            Ok(())
        }
    }

    fn sample_device(id: u16) -> DeviceConfig {
        DeviceConfig {
            id,
            nicla_type: 1,
            tag_class: TagClassPolicy::Fixed(2),
            battery_range: [20, 90],
            interval_secs: None,
            position: None,
        }
    }

    fn sample_context(schema: SchemaVersion, max_packets: Option<u64>) -> WorkerContext {
        WorkerContext {
            device: sample_device(7),
            schema,
            interval: Duration::from_millis(1),
            seed: Some(42),
            max_packets,
        }
    }

    #[tokio::test]
    async fn test_worker_respects_packet_budget() {
        let sink = CollectingSink::default();
        let datagrams = sink.datagrams.clone();

        let mut worker = DeviceWorker::spawn(sample_context(SchemaVersion::V1, Some(3)), sink);
        worker.wait().await;

        let collected = datagrams.lock().unwrap();
        assert_eq!(collected.len(), 3);
        for datagram in collected.iter() {
            assert_eq!(datagram.len(), SchemaVersion::V1.packet_len());
            assert_eq!(datagram[0] as usize, datagram.len());
        }
        assert!(!worker.is_running());
        assert_eq!(worker.metrics().packets_sent(), 3);
        assert_eq!(worker.metrics().bytes_sent(), 3 * 46);
    }

    #[tokio::test]
    async fn test_worker_stop_terminates_loop() {
        let sink = CollectingSink::default();
        let datagrams = sink.datagrams.clone();

        let mut worker = DeviceWorker::spawn(sample_context(SchemaVersion::V2, None), sink);
        tokio::time::sleep(Duration::from_millis(30)).await;
        worker.stop();
        worker.wait().await;

        assert!(!worker.is_running());
        assert!(!datagrams.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_keeps_worker_alive() {
        let mut worker = DeviceWorker::spawn(sample_context(SchemaVersion::V1, None), FailingSink);
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(worker.is_running());
        assert!(worker.metrics().send_errors() > 0);
        assert_eq!(worker.metrics().packets_sent(), 0);

        worker.stop();
        worker.wait().await;
        assert!(!worker.is_running());
    }
}
