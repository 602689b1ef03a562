//! Accumulators driven by the engine.
//!
//! - [`Accumulator`] - The capability set the engine consumes
//! - [`DigestAccumulator`] - Adapter for any RustCrypto `digest::Digest`
//! - [`Blake3Accumulator`] - BLAKE3 (requires `blake3` feature)
//! - [`Algorithm`] - Named algorithms, instantiated on demand

mod accumulator;
mod algorithm;

#[cfg(feature = "blake3")]
mod blake3;

pub use accumulator::{Accumulator, DigestAccumulator};
pub use algorithm::Algorithm;

#[cfg(feature = "blake3")]
pub use self::blake3::Blake3Accumulator;
