//! # Transport
//!
//! 数据发射模块。
//!
//! 负责：
//! - 将编码后的 datagram 发往收集端 (UDP)
//! - 提供 dry-run 的 hex dump 模式
//! - 单次发送，不重试，不追踪投递结果

pub mod log;
pub mod udp;

pub use contracts::PacketSink;
pub use log::LogSink;
pub use udp::UdpSink;
