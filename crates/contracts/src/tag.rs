//! Sensor field registry
//!
//! The closed set of field kinds a telemetry packet can carry. Every kind
//! owns a stable one-byte wire tag, a value shape per schema version, and
//! (for the randomized scalars) the physical range readings are drawn from.
//! Encoder, decoder and generator all derive their width and range tables
//! from here.

use serde::{Deserialize, Serialize};

use crate::SchemaVersion;

/// Wire tag of a sensor field.
///
/// Discriminants are the on-wire tag bytes and must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SensorTag {
    Battery = 0x00,
    Orientation = 0x01,
    Acceleration = 0x02,
    Vibration = 0x03,
    Temperature = 0x04,
    Pressure = 0x05,
    Latitude = 0x06,
    Longitude = 0x07,
    Altitude = 0x08,
    Co2 = 0x09,
    So2 = 0x0A,
}

/// Value shape of a field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueShape {
    ScalarU8,
    ScalarF32,
    VecI16x3,
    VecF32x3,
    VecF32x4,
}

impl ValueShape {
    /// Serialized width of the value in bytes, tag byte excluded.
    pub const fn wire_width(self) -> usize {
        match self {
            Self::ScalarU8 => 1,
            Self::ScalarF32 => 4,
            Self::VecI16x3 => 6,
            Self::VecF32x3 => 12,
            Self::VecF32x4 => 16,
        }
    }
}

impl SensorTag {
    /// Every registered tag, in wire-tag order.
    pub const ALL: [SensorTag; 11] = [
        Self::Battery,
        Self::Orientation,
        Self::Acceleration,
        Self::Vibration,
        Self::Temperature,
        Self::Pressure,
        Self::Latitude,
        Self::Longitude,
        Self::Altitude,
        Self::Co2,
        Self::So2,
    ];

    /// The on-wire tag byte.
    pub const fn wire(self) -> u8 {
        self as u8
    }

    /// Look up a tag from its wire byte.
    pub fn from_wire(raw: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.wire() == raw)
    }

    /// Value shape under the given schema version.
    ///
    /// Acceleration is the only kind whose encoding differs between
    /// versions (i16 milli-g under V1, f32 g under V2).
    pub fn shape(self, schema: SchemaVersion) -> ValueShape {
        match self {
            Self::Battery => ValueShape::ScalarU8,
            Self::Orientation => ValueShape::VecF32x4,
            Self::Acceleration => match schema {
                SchemaVersion::V1 => ValueShape::VecI16x3,
                SchemaVersion::V2 => ValueShape::VecF32x3,
            },
            Self::Vibration
            | Self::Temperature
            | Self::Pressure
            | Self::Latitude
            | Self::Longitude
            | Self::Altitude
            | Self::Co2
            | Self::So2 => ValueShape::ScalarF32,
        }
    }

    /// Human-readable name for logs and decoded dumps.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::Orientation => "orientation",
            Self::Acceleration => "acceleration",
            Self::Vibration => "vibration",
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Altitude => "altitude",
            Self::Co2 => "co2",
            Self::So2 => "so2",
        }
    }
}

/// Physical draw ranges (inclusive) for the randomized field kinds.
pub mod ranges {
    /// Vibration magnitude.
    pub const VIBRATION: (f32, f32) = (0.0, 5.0);

    /// Ambient temperature, °C.
    pub const TEMPERATURE: (f32, f32) = (15.0, 35.0);

    /// Barometric pressure, hPa.
    pub const PRESSURE: (f32, f32) = (980.0, 1020.0);

    /// CO2 concentration, ppm.
    pub const CO2: (f32, f32) = (400.0, 2000.0);

    /// SO2 concentration, ppb.
    pub const SO2: (f32, f32) = (0.0, 500.0);

    /// Per-axis acceleration under V1, milli-g.
    pub const ACCEL_MILLI_G: (i16, i16) = (-1000, 1000);

    /// Per-axis acceleration under V2, g.
    pub const ACCEL_G: (f32, f32) = (-1.0, 1.0);

    /// Quaternion component draw range before normalization.
    pub const QUAT_COMPONENT: (f32, f32) = (-1.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_bytes_round_trip() {
        for tag in SensorTag::ALL {
            assert_eq!(SensorTag::from_wire(tag.wire()), Some(tag));
        }
    }

    #[test]
    fn unknown_wire_byte_rejected() {
        assert_eq!(SensorTag::from_wire(0x0B), None);
        assert_eq!(SensorTag::from_wire(0xFF), None);
    }

    #[test]
    fn tags_are_dense_from_zero() {
        for (index, tag) in SensorTag::ALL.iter().enumerate() {
            assert_eq!(tag.wire() as usize, index);
        }
    }

    #[test]
    fn acceleration_shape_depends_on_schema() {
        assert_eq!(
            SensorTag::Acceleration.shape(SchemaVersion::V1),
            ValueShape::VecI16x3
        );
        assert_eq!(
            SensorTag::Acceleration.shape(SchemaVersion::V2),
            ValueShape::VecF32x3
        );
        // All other shapes are version independent.
        for tag in SensorTag::ALL {
            if tag != SensorTag::Acceleration {
                assert_eq!(tag.shape(SchemaVersion::V1), tag.shape(SchemaVersion::V2));
            }
        }
    }

    #[test]
    fn wire_widths() {
        assert_eq!(ValueShape::ScalarU8.wire_width(), 1);
        assert_eq!(ValueShape::ScalarF32.wire_width(), 4);
        assert_eq!(ValueShape::VecI16x3.wire_width(), 6);
        assert_eq!(ValueShape::VecF32x3.wire_width(), 12);
        assert_eq!(ValueShape::VecF32x4.wire_width(), 16);
    }
}
