//! Named digest algorithms.

use std::fmt;
use std::str::FromStr;

use crate::error::DigestError;
use crate::hash::Accumulator;

#[cfg(any(feature = "md5", feature = "sha1", feature = "sha2"))]
use crate::hash::DigestAccumulator;

#[cfg(feature = "blake3")]
use crate::hash::Blake3Accumulator;

/// A digest algorithm that can be instantiated by name.
///
/// Every variant exists regardless of enabled features; instantiating one
/// whose feature is disabled yields [`DigestError::Unavailable`].
///
/// # Example
///
/// ```
/// use multidigest::Algorithm;
///
/// let algo: Algorithm = "sha-256".parse()?;
/// assert_eq!(algo, Algorithm::Sha256);
/// assert_eq!(algo.output_size(), 32);
/// # Ok::<(), multidigest::DigestError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    /// MD5 (feature `md5`)
    Md5,
    /// SHA-1 (feature `sha1`)
    Sha1,
    /// SHA-224 (feature `sha2`)
    Sha224,
    /// SHA-256 (feature `sha2`)
    Sha256,
    /// SHA-384 (feature `sha2`)
    Sha384,
    /// SHA-512 (feature `sha2`)
    Sha512,
    /// BLAKE3 (feature `blake3`)
    Blake3,
}

impl Algorithm {
    /// All known algorithms, available or not.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Blake3,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha224 => "sha224",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
            Algorithm::Blake3 => "blake3",
        }
    }

    /// Digest length in bytes.
    pub fn output_size(self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha224 => 28,
            Algorithm::Sha256 | Algorithm::Blake3 => 32,
            Algorithm::Sha384 => 48,
            Algorithm::Sha512 => 64,
        }
    }

    /// Returns `true` if this build can instantiate the algorithm.
    pub fn is_available(self) -> bool {
        match self {
            Algorithm::Md5 => cfg!(feature = "md5"),
            Algorithm::Sha1 => cfg!(feature = "sha1"),
            Algorithm::Sha224 | Algorithm::Sha256 | Algorithm::Sha384 | Algorithm::Sha512 => {
                cfg!(feature = "sha2")
            }
            Algorithm::Blake3 => cfg!(feature = "blake3"),
        }
    }

    /// Creates a fresh accumulator for this algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Unavailable`] if the algorithm's feature is
    /// disabled.
    pub fn accumulator(self) -> Result<Box<dyn Accumulator>, DigestError> {
        match self {
            #[cfg(feature = "md5")]
            Algorithm::Md5 => Ok(Box::new(DigestAccumulator::<md5::Md5>::new())),
            #[cfg(feature = "sha1")]
            Algorithm::Sha1 => Ok(Box::new(DigestAccumulator::<sha1::Sha1>::new())),
            #[cfg(feature = "sha2")]
            Algorithm::Sha224 => Ok(Box::new(DigestAccumulator::<sha2::Sha224>::new())),
            #[cfg(feature = "sha2")]
            Algorithm::Sha256 => Ok(Box::new(DigestAccumulator::<sha2::Sha256>::new())),
            #[cfg(feature = "sha2")]
            Algorithm::Sha384 => Ok(Box::new(DigestAccumulator::<sha2::Sha384>::new())),
            #[cfg(feature = "sha2")]
            Algorithm::Sha512 => Ok(Box::new(DigestAccumulator::<sha2::Sha512>::new())),
            #[cfg(feature = "blake3")]
            Algorithm::Blake3 => Ok(Box::new(Blake3Accumulator::new())),
            #[allow(unreachable_patterns)]
            other => Err(DigestError::unavailable(other.name())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Algorithm::Md5),
            "sha1" | "sha-1" => Ok(Algorithm::Sha1),
            "sha224" | "sha-224" => Ok(Algorithm::Sha224),
            "sha256" | "sha-256" => Ok(Algorithm::Sha256),
            "sha384" | "sha-384" => Ok(Algorithm::Sha384),
            "sha512" | "sha-512" => Ok(Algorithm::Sha512),
            "blake3" => Ok(Algorithm::Blake3),
            _ => Err(DigestError::unavailable(s)),
        }
    }
}
