//! # Generator
//!
//! Randomized reading fabrication. One [`ReadingGenerator`] per simulated
//! device: it owns its RNG (OS-seeded or fixed-seed for reproducible runs)
//! and draws every field uniformly within the registry's physical ranges,
//! normalizing orientation draws to unit quaternions.

pub mod quat;
mod readings;

pub use readings::ReadingGenerator;
