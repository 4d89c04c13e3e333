//! Packet encoder
//!
//! Serializes a `TelemetryPacket` into its datagram form. Field shapes are
//! checked against the registry before any byte is written for them, and
//! the length prefix is patched in from the finished buffer.

use bytes::{BufMut, Bytes, BytesMut};
use contracts::{ByteOrder, FieldValue, SchemaVersion, TelemetryPacket};

use crate::error::{CodecError, Result};

/// Encode one packet under the given schema version.
///
/// # Errors
/// - [`CodecError::ShapeMismatch`] when a field value does not match the
///   registry shape for its tag under this schema
/// - [`CodecError::PacketTooLong`] when the serialized size exceeds the
///   one-byte length prefix
pub fn encode_packet(packet: &TelemetryPacket, schema: SchemaVersion) -> Result<Bytes> {
    let order = schema.byte_order();
    let mut buf = BytesMut::with_capacity(schema.packet_len());

    // Length prefix, patched once the total is known.
    buf.put_u8(0);
    put_u16(&mut buf, packet.device_id, order);
    buf.put_u8(packet.nicla_type);
    buf.put_u8(packet.tag_class);

    for field in &packet.fields {
        let expected = field.tag.shape(schema);
        let got = field.value.shape();
        if expected != got {
            return Err(CodecError::ShapeMismatch {
                tag: field.tag,
                expected,
                got,
            });
        }
        buf.put_u8(field.tag.wire());
        put_value(&mut buf, &field.value, order);
    }

    let total = buf.len();
    let declared = u8::try_from(total).map_err(|_| CodecError::PacketTooLong { len: total })?;
    buf[0] = declared;

    Ok(buf.freeze())
}

fn put_value(buf: &mut BytesMut, value: &FieldValue, order: ByteOrder) {
    match value {
        FieldValue::U8(v) => buf.put_u8(*v),
        FieldValue::F32(v) => put_f32(buf, *v, order),
        FieldValue::I16x3(v) => {
            for component in v {
                put_i16(buf, *component, order);
            }
        }
        FieldValue::F32x3(v) => {
            for component in v {
                put_f32(buf, *component, order);
            }
        }
        FieldValue::F32x4(v) => {
            for component in v {
                put_f32(buf, *component, order);
            }
        }
    }
}

fn put_u16(buf: &mut BytesMut, value: u16, order: ByteOrder) {
    match order {
        ByteOrder::Big => buf.put_u16(value),
        ByteOrder::Little => buf.put_u16_le(value),
    }
}

fn put_i16(buf: &mut BytesMut, value: i16, order: ByteOrder) {
    match order {
        ByteOrder::Big => buf.put_i16(value),
        ByteOrder::Little => buf.put_i16_le(value),
    }
}

fn put_f32(buf: &mut BytesMut, value: f32, order: ByteOrder) {
    match order {
        ByteOrder::Big => buf.put_f32(value),
        ByteOrder::Little => buf.put_f32_le(value),
    }
}
