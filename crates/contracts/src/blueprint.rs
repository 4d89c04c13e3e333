//! FleetBlueprint - Config Loader 输出
//!
//! 描述完整的仿真舰队配置：schema 版本、发送目标、默认节奏、设备列表。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::SchemaVersion;

/// 完整的舰队配置蓝图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetBlueprint {
    /// 线格式 schema 版本
    #[serde(default)]
    pub schema: SchemaVersion,

    /// 舰队随机种子 (可选)
    ///
    /// 固定后整次运行可复现；每个设备从种子加其 ID 派生自己的 RNG。
    #[serde(default)]
    pub seed: Option<u64>,

    /// 发送配置
    #[serde(default)]
    pub transmit: TransmitConfig,

    /// 设备列表
    pub devices: Vec<DeviceConfig>,
}

/// 发送配置：目标端点与默认节奏
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmitConfig {
    /// 收集端主机
    #[serde(default = "default_host")]
    pub host: String,

    /// 收集端 UDP 端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 默认发送间隔 (秒)，必须 > 0
    #[serde(default = "default_interval")]
    pub interval_secs: f64,

    /// 传输模式
    #[serde(default)]
    pub mode: TransportMode,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    6000
}

fn default_interval() -> f64 {
    1.0
}

impl Default for TransmitConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            interval_secs: default_interval(),
            mode: TransportMode::default(),
        }
    }
}

/// 传输模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// UDP 发射，fire-and-forget
    #[default]
    Udp,
    /// 只记录 hex dump，不触网
    Log,
}

/// 设备配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// 设备 ID，舰队内必须唯一
    pub id: u16,

    /// 板卡类型标识
    #[serde(default = "default_nicla_type")]
    pub nicla_type: u8,

    /// tagClass 生成策略
    #[serde(default)]
    pub tag_class: TagClassPolicy,

    /// 电量百分比范围 [min, max]，闭区间
    #[serde(default = "default_battery_range")]
    pub battery_range: [u8; 2],

    /// 每设备发送间隔覆盖 (秒)
    #[serde(default)]
    pub interval_secs: Option<f64>,

    /// 地理位置 (schema v2 必填)
    #[serde(default)]
    pub position: Option<GeoPosition>,
}

fn default_nicla_type() -> u8 {
    1
}

fn default_battery_range() -> [u8; 2] {
    [0, 100]
}

/// tagClass 生成策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagClassPolicy {
    /// 每包独立均匀取 0..=2
    Random,
    /// 固定值
    Fixed(u8),
}

impl Default for TagClassPolicy {
    fn default() -> Self {
        // 实测流量恒为 2
        Self::Fixed(2)
    }
}

/// 地理位置：固定点或独立范围盒
///
/// 按字段类型区分两种写法：标量为固定点，[min, max] 数组为范围。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeoPosition {
    /// 每轴独立的 [min, max] 范围
    Ranged {
        latitude: [f64; 2],
        longitude: [f64; 2],
        altitude: [f64; 2],
    },
    /// 固定点
    Fixed {
        latitude: f64,
        longitude: f64,
        altitude: f64,
    },
}

impl FleetBlueprint {
    /// 设备的有效发送间隔
    pub fn interval_for(&self, device: &DeviceConfig) -> Duration {
        Duration::from_secs_f64(
            device
                .interval_secs
                .unwrap_or(self.transmit.interval_secs),
        )
    }

    /// 设备的派生随机种子 (舰队种子 + 设备 ID)
    pub fn seed_for(&self, device: &DeviceConfig) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(u64::from(device.id)))
    }
}

impl TransmitConfig {
    /// 目标端点，"host:port" 形式
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
