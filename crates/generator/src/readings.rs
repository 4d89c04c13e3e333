//! 读数生成器
//!
//! 按设备配置与 schema 版本伪造一个采样周期的全部字段。

use contracts::{
    ranges, DeviceConfig, FieldValue, GeoPosition, SchemaVersion, SensorField, SensorTag,
    TagClassPolicy, TelemetryPacket,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::quat;

/// 读数生成器
///
/// 每个设备一个实例，持有自己的 RNG，互不共享状态。
pub struct ReadingGenerator {
    device: DeviceConfig,
    schema: SchemaVersion,
    rng: StdRng,
}

#[derive(Clone, Copy)]
enum GeoAxis {
    Latitude,
    Longitude,
    Altitude,
}

impl ReadingGenerator {
    /// 从 OS 熵创建
    pub fn new(device: &DeviceConfig, schema: SchemaVersion) -> Self {
        Self::from_rng(device, schema, StdRng::from_os_rng())
    }

    /// 固定种子创建，同一种子产生相同序列
    pub fn with_seed(device: &DeviceConfig, schema: SchemaVersion, seed: u64) -> Self {
        Self::from_rng(device, schema, StdRng::seed_from_u64(seed))
    }

    fn from_rng(device: &DeviceConfig, schema: SchemaVersion, rng: StdRng) -> Self {
        Self {
            device: device.clone(),
            schema,
            rng,
        }
    }

    /// 伪造下一个数据包
    ///
    /// 字段按 schema 规定顺序排列，全部落在 registry 的物理范围内。
    pub fn next_packet(&mut self) -> TelemetryPacket {
        let fields = self
            .schema
            .field_tags()
            .iter()
            .map(|&tag| SensorField {
                tag,
                value: self.draw(tag),
            })
            .collect();

        TelemetryPacket {
            device_id: self.device.id,
            nicla_type: self.device.nicla_type,
            tag_class: self.draw_tag_class(),
            fields,
        }
    }

    fn draw(&mut self, tag: SensorTag) -> FieldValue {
        match tag {
            SensorTag::Battery => {
                let [min, max] = self.device.battery_range;
                FieldValue::U8(self.rng.random_range(min..=max))
            }
            SensorTag::Orientation => FieldValue::F32x4(self.draw_orientation()),
            SensorTag::Acceleration => self.draw_acceleration(),
            SensorTag::Vibration => FieldValue::F32(self.draw_in(ranges::VIBRATION)),
            SensorTag::Temperature => FieldValue::F32(self.draw_in(ranges::TEMPERATURE)),
            SensorTag::Pressure => FieldValue::F32(self.draw_in(ranges::PRESSURE)),
            SensorTag::Latitude => FieldValue::F32(self.draw_geo(GeoAxis::Latitude)),
            SensorTag::Longitude => FieldValue::F32(self.draw_geo(GeoAxis::Longitude)),
            SensorTag::Altitude => FieldValue::F32(self.draw_geo(GeoAxis::Altitude)),
            SensorTag::Co2 => FieldValue::F32(self.draw_in(ranges::CO2)),
            SensorTag::So2 => FieldValue::F32(self.draw_in(ranges::SO2)),
        }
    }

    fn draw_in(&mut self, (min, max): (f32, f32)) -> f32 {
        self.rng.random_range(min..=max)
    }

    fn draw_orientation(&mut self) -> [f32; 4] {
        let (min, max) = ranges::QUAT_COMPONENT;
        let raw: [f32; 4] = std::array::from_fn(|_| self.rng.random_range(min..=max));
        quat::normalize(raw)
    }

    fn draw_acceleration(&mut self) -> FieldValue {
        match self.schema {
            SchemaVersion::V1 => {
                let (min, max) = ranges::ACCEL_MILLI_G;
                FieldValue::I16x3(std::array::from_fn(|_| self.rng.random_range(min..=max)))
            }
            SchemaVersion::V2 => {
                let (min, max) = ranges::ACCEL_G;
                FieldValue::F32x3(std::array::from_fn(|_| self.rng.random_range(min..=max)))
            }
        }
    }

    fn draw_geo(&mut self, axis: GeoAxis) -> f32 {
        match &self.device.position {
            // schema v1 从不请求 geo 字段；未配置时退化为 0
            None => 0.0,
            Some(GeoPosition::Fixed {
                latitude,
                longitude,
                altitude,
            }) => {
                let value = match axis {
                    GeoAxis::Latitude => *latitude,
                    GeoAxis::Longitude => *longitude,
                    GeoAxis::Altitude => *altitude,
                };
                value as f32
            }
            Some(GeoPosition::Ranged {
                latitude,
                longitude,
                altitude,
            }) => {
                let [min, max] = match axis {
                    GeoAxis::Latitude => *latitude,
                    GeoAxis::Longitude => *longitude,
                    GeoAxis::Altitude => *altitude,
                };
                self.rng.random_range(min..=max) as f32
            }
        }
    }

    fn draw_tag_class(&mut self) -> u8 {
        match self.device.tag_class {
            TagClassPolicy::Fixed(value) => value,
            TagClassPolicy::Random => self.rng.random_range(0..=2),
        }
    }
}
