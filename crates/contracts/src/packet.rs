//! TelemetryPacket - Generator 输出
//!
//! 单个遥测数据包的结构化表示，编码前的内存形态。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{SensorTag, ValueShape};

/// 遥测数据包
///
/// 一个设备在一个采样周期内的全部字段，按 schema 规定的顺序排列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPacket {
    /// 设备 ID
    pub device_id: u16,

    /// 板卡类型标识
    pub nicla_type: u8,

    /// 标签类别 (0..=2)
    pub tag_class: u8,

    /// 有序字段列表
    pub fields: Vec<SensorField>,
}

/// 单个传感器字段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorField {
    /// 字段标签
    pub tag: SensorTag,

    /// 字段值
    pub value: FieldValue,
}

/// 字段值
///
/// 变体与 registry 的 [`ValueShape`] 一一对应。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    U8(u8),
    F32(f32),
    I16x3([i16; 3]),
    F32x3([f32; 3]),
    F32x4([f32; 4]),
}

impl FieldValue {
    /// 值的实际形态
    pub fn shape(&self) -> ValueShape {
        match self {
            Self::U8(_) => ValueShape::ScalarU8,
            Self::F32(_) => ValueShape::ScalarF32,
            Self::I16x3(_) => ValueShape::VecI16x3,
            Self::F32x3(_) => ValueShape::VecF32x3,
            Self::F32x4(_) => ValueShape::VecF32x4,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v:.3}"),
            Self::I16x3([x, y, z]) => write!(f, "({x}, {y}, {z})"),
            Self::F32x3([x, y, z]) => write!(f, "({x:.3}, {y:.3}, {z:.3})"),
            Self::F32x4([x, y, z, w]) => {
                write!(f, "({x:.3}, {y:.3}, {z:.3}, {w:.3})")
            }
        }
    }
}

impl TelemetryPacket {
    /// 按标签查找字段值
    pub fn field(&self, tag: SensorTag) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.tag == tag)
            .map(|field| &field.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_shapes_match_variants() {
        assert_eq!(FieldValue::U8(85).shape(), ValueShape::ScalarU8);
        assert_eq!(FieldValue::F32(0.5).shape(), ValueShape::ScalarF32);
        assert_eq!(FieldValue::I16x3([1, 2, 3]).shape(), ValueShape::VecI16x3);
        assert_eq!(
            FieldValue::F32x3([0.1, 0.2, 0.3]).shape(),
            ValueShape::VecF32x3
        );
        assert_eq!(
            FieldValue::F32x4([0.0, 0.0, 0.0, 1.0]).shape(),
            ValueShape::VecF32x4
        );
    }

    #[test]
    fn field_lookup_by_tag() {
        let packet = TelemetryPacket {
            device_id: 2,
            nicla_type: 1,
            tag_class: 2,
            fields: vec![
                SensorField {
                    tag: SensorTag::Battery,
                    value: FieldValue::U8(85),
                },
                SensorField {
                    tag: SensorTag::Vibration,
                    value: FieldValue::F32(0.5),
                },
            ],
        };

        assert_eq!(packet.field(SensorTag::Battery), Some(&FieldValue::U8(85)));
        assert_eq!(packet.field(SensorTag::Temperature), None);
    }
}
