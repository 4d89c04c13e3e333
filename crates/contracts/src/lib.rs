//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Wire Model
//! - A packet is a tagged-field datagram with a 5-byte header
//! - A `SchemaVersion` pins byte order, field set and derived total length

mod blueprint;
mod error;
mod packet;
mod schema;
mod sink;
mod tag;

pub use blueprint::*;
pub use error::*;
pub use packet::*;
pub use schema::*;
pub use sink::*;
pub use tag::*;
