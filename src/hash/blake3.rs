//! BLAKE3 accumulator.

use std::io;

use crate::hash::Accumulator;
use crate::output::Digest;

/// An accumulator that computes BLAKE3 hashes.
#[derive(Debug, Clone)]
pub struct Blake3Accumulator {
    state: blake3::Hasher,
}

impl Blake3Accumulator {
    /// Creates a new accumulator.
    pub fn new() -> Self {
        Self {
            state: blake3::Hasher::new(),
        }
    }

    /// Creates an accumulator for keyed hashing.
    pub fn new_keyed(key: &[u8; 32]) -> Self {
        Self {
            state: blake3::Hasher::new_keyed(key),
        }
    }
}

impl Default for Blake3Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for Blake3Accumulator {
    fn consume(&mut self, data: &[u8]) -> io::Result<()> {
        self.state.update(data);
        Ok(())
    }

    fn finalize(self: Box<Self>) -> Digest {
        Digest::from(&self.state.finalize().as_bytes()[..])
    }
}
