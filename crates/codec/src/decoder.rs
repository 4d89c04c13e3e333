//! Packet decoder
//!
//! Registry-driven inverse of the encoder, used by tests, the `sample`
//! command and offline inspection. The shape table decides how many bytes
//! each tag consumes, so any field subset decodes without a per-schema
//! layout table.

use bytes::Buf;
use contracts::{
    ByteOrder, FieldValue, SchemaVersion, SensorField, SensorTag, TelemetryPacket, ValueShape,
    HEADER_LEN,
};

use crate::error::{CodecError, Result};

/// Decode one datagram under the given schema version.
///
/// # Errors
/// - [`CodecError::Truncated`] when the buffer is shorter than the header
///   or a field value runs past its end
/// - [`CodecError::LengthMismatch`] when the length prefix disagrees with
///   the buffer length
/// - [`CodecError::UnknownTag`] on an unregistered tag byte
pub fn decode_packet(datagram: &[u8], schema: SchemaVersion) -> Result<TelemetryPacket> {
    if datagram.len() < HEADER_LEN {
        return Err(CodecError::Truncated {
            needed: HEADER_LEN,
            remaining: datagram.len(),
        });
    }

    let declared = datagram[0] as usize;
    if declared != datagram.len() {
        return Err(CodecError::LengthMismatch {
            declared,
            actual: datagram.len(),
        });
    }

    let order = schema.byte_order();
    let mut buf = &datagram[1..];
    let device_id = get_u16(&mut buf, order);
    let nicla_type = buf.get_u8();
    let tag_class = buf.get_u8();

    let mut fields = Vec::new();
    while buf.has_remaining() {
        let raw = buf.get_u8();
        let tag = SensorTag::from_wire(raw).ok_or(CodecError::UnknownTag { raw })?;
        let shape = tag.shape(schema);
        if buf.remaining() < shape.wire_width() {
            return Err(CodecError::Truncated {
                needed: shape.wire_width(),
                remaining: buf.remaining(),
            });
        }
        fields.push(SensorField {
            tag,
            value: get_value(&mut buf, shape, order),
        });
    }

    Ok(TelemetryPacket {
        device_id,
        nicla_type,
        tag_class,
        fields,
    })
}

fn get_value(buf: &mut &[u8], shape: ValueShape, order: ByteOrder) -> FieldValue {
    match shape {
        ValueShape::ScalarU8 => FieldValue::U8(buf.get_u8()),
        ValueShape::ScalarF32 => FieldValue::F32(get_f32(buf, order)),
        ValueShape::VecI16x3 => {
            let mut v = [0i16; 3];
            for component in &mut v {
                *component = get_i16(buf, order);
            }
            FieldValue::I16x3(v)
        }
        ValueShape::VecF32x3 => {
            let mut v = [0f32; 3];
            for component in &mut v {
                *component = get_f32(buf, order);
            }
            FieldValue::F32x3(v)
        }
        ValueShape::VecF32x4 => {
            let mut v = [0f32; 4];
            for component in &mut v {
                *component = get_f32(buf, order);
            }
            FieldValue::F32x4(v)
        }
    }
}

fn get_u16(buf: &mut &[u8], order: ByteOrder) -> u16 {
    match order {
        ByteOrder::Big => buf.get_u16(),
        ByteOrder::Little => buf.get_u16_le(),
    }
}

fn get_i16(buf: &mut &[u8], order: ByteOrder) -> i16 {
    match order {
        ByteOrder::Big => buf.get_i16(),
        ByteOrder::Little => buf.get_i16_le(),
    }
}

fn get_f32(buf: &mut &[u8], order: ByteOrder) -> f32 {
    match order {
        ByteOrder::Big => buf.get_f32(),
        ByteOrder::Little => buf.get_f32_le(),
    }
}
