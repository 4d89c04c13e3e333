//! Wire schema versions
//!
//! A schema version pins everything a peer needs to interpret a datagram:
//! integer/float byte order, the ordered field set and the acceleration
//! encoding. The total packet length is derived, never stated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SensorTag;

/// Packet header length: length byte + device id + nicla type + tag class.
pub const HEADER_LEN: usize = 5;

/// Wire schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// First firmware generation: big-endian, six fields, i16 accelerometer.
    V1,
    /// Extended generation: little-endian, adds geolocation and gas fields.
    #[default]
    V2,
}

/// Multi-byte value byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

const V1_FIELDS: [SensorTag; 6] = [
    SensorTag::Battery,
    SensorTag::Orientation,
    SensorTag::Acceleration,
    SensorTag::Vibration,
    SensorTag::Temperature,
    SensorTag::Pressure,
];

const V2_FIELDS: [SensorTag; 11] = [
    SensorTag::Battery,
    SensorTag::Orientation,
    SensorTag::Acceleration,
    SensorTag::Vibration,
    SensorTag::Temperature,
    SensorTag::Pressure,
    SensorTag::Latitude,
    SensorTag::Longitude,
    SensorTag::Altitude,
    SensorTag::Co2,
    SensorTag::So2,
];

impl SchemaVersion {
    /// Byte order used for every multi-byte value, header included.
    pub const fn byte_order(self) -> ByteOrder {
        match self {
            Self::V1 => ByteOrder::Big,
            Self::V2 => ByteOrder::Little,
        }
    }

    /// Canonical field order of a full packet under this version.
    pub const fn field_tags(self) -> &'static [SensorTag] {
        match self {
            Self::V1 => &V1_FIELDS,
            Self::V2 => &V2_FIELDS,
        }
    }

    /// Total encoded length of a full packet, in bytes.
    ///
    /// Computed from the registry shapes so a field-set change can never
    /// desynchronize it from the actual wire size.
    pub fn packet_len(self) -> usize {
        let fields: usize = self
            .field_tags()
            .iter()
            .map(|tag| 1 + tag.shape(self).wire_width())
            .sum();
        HEADER_LEN + fields
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_lengths_match_wire_contract() {
        assert_eq!(SchemaVersion::V1.packet_len(), 46);
        assert_eq!(SchemaVersion::V2.packet_len(), 77);
    }

    #[test]
    fn byte_orders() {
        assert_eq!(SchemaVersion::V1.byte_order(), ByteOrder::Big);
        assert_eq!(SchemaVersion::V2.byte_order(), ByteOrder::Little);
    }

    #[test]
    fn v2_extends_v1_field_order() {
        let v1 = SchemaVersion::V1.field_tags();
        let v2 = SchemaVersion::V2.field_tags();
        assert_eq!(&v2[..v1.len()], v1);
        assert_eq!(v2.last(), Some(&SensorTag::So2));
    }

    #[test]
    fn serde_names_are_lowercase() {
        let v: SchemaVersion = serde_json::from_str("\"v1\"").unwrap();
        assert_eq!(v, SchemaVersion::V1);
        assert_eq!(serde_json::to_string(&SchemaVersion::V2).unwrap(), "\"v2\"");
    }
}
