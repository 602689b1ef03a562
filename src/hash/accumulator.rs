//! The accumulator abstraction driven by the engine.

use std::fmt;
use std::io;

use crate::output::Digest;

/// An incremental hash or checksum.
///
/// Each accumulator is owned by exactly one worker thread for the duration of
/// a call. `consume` is called once per chunk, in stream order; `finalize`
/// consumes the box and so runs at most once, after the last `consume`.
///
/// # Example
///
/// ```
/// use std::io;
/// use multidigest::{Accumulator, Digest};
///
/// /// Sum of all bytes, modulo 256.
/// #[derive(Default)]
/// struct ByteSum(u8);
///
/// impl Accumulator for ByteSum {
///     fn consume(&mut self, data: &[u8]) -> io::Result<()> {
///         self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(b));
///         Ok(())
///     }
///
///     fn finalize(self: Box<Self>) -> Digest {
///         Digest::from(vec![self.0])
///     }
/// }
/// ```
pub trait Accumulator: Send {
    /// Folds `data` into the running state.
    ///
    /// An error aborts the whole call.
    fn consume(&mut self, data: &[u8]) -> io::Result<()>;

    /// Produces the final digest.
    fn finalize(self: Box<Self>) -> Digest;
}

impl fmt::Debug for dyn Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Accumulator")
    }
}

/// Adapter for any RustCrypto [`digest::Digest`] implementation.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "sha2")] {
/// use multidigest::{Accumulator, DigestAccumulator};
///
/// let acc: Box<dyn Accumulator> = Box::new(DigestAccumulator::<sha2::Sha256>::new());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DigestAccumulator<D> {
    state: D,
}

impl<D: digest::Digest> DigestAccumulator<D> {
    /// Creates an accumulator in the algorithm's initial state.
    pub fn new() -> Self {
        Self { state: D::new() }
    }

    /// Wraps an existing hasher, keeping whatever it has already consumed.
    pub fn from_digest(state: D) -> Self {
        Self { state }
    }
}

impl<D: digest::Digest + Send> Accumulator for DigestAccumulator<D> {
    fn consume(&mut self, data: &[u8]) -> io::Result<()> {
        self.state.update(data);
        Ok(())
    }

    fn finalize(self: Box<Self>) -> Digest {
        Digest::from(self.state.finalize().to_vec())
    }
}

#[cfg(all(test, any(feature = "md5", feature = "sha2")))]
mod tests {
    use super::*;

    #[cfg(feature = "sha2")]
    #[test]
    fn test_digest_accumulator_incremental() {
        use sha2::{Digest as _, Sha256};

        let mut acc = Box::new(DigestAccumulator::<Sha256>::new());
        acc.consume(b"hello ").unwrap();
        acc.consume(b"world").unwrap();
        let digest = acc.finalize();

        let expected = Sha256::digest(b"hello world");
        assert_eq!(digest.as_bytes(), expected.as_slice());
    }

    #[cfg(feature = "md5")]
    #[test]
    fn test_from_digest_keeps_prefix() {
        use md5::{Digest as _, Md5};

        let mut prefixed = Md5::new();
        prefixed.update(b"ab");
        let mut acc = Box::new(DigestAccumulator::from_digest(prefixed));
        acc.consume(b"c").unwrap();
        assert_eq!(acc.finalize().to_hex(), "900150983cd24fb0d6963f7d28e17f72");
    }
}
