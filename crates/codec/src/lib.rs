//! # Codec
//!
//! Tagged-field wire codec for telemetry datagrams.
//!
//! Layout (both schema versions):
//!
//! ```text
//! offset 0  length    u8   total datagram length, header included
//! offset 1  deviceId  u16  schema byte order
//! offset 3  niclaType u8
//! offset 4  tagClass  u8
//! offset 5  fields    tag u8 + value bytes, repeated
//! ```
//!
//! The length byte is always computed from the serialized size, never
//! hardcoded. Decoding is registry driven: the shape table in `contracts`
//! determines how many bytes each tag consumes, so any field subset and
//! order decodes.

mod decoder;
mod encoder;
mod error;

pub use decoder::decode_packet;
pub use encoder::encode_packet;
pub use error::{CodecError, Result};
