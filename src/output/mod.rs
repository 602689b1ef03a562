//! Digest output type.
//!
//! - [`Digest`] - Immutable, algorithm-sized digest bytes

use std::fmt;

use bytes::Bytes;

/// The final output of one accumulator.
///
/// Digests are immutable and cheap to clone. Their length is whatever the
/// producing algorithm emits (16 bytes for MD5, 32 for SHA-256, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(Bytes);

impl Digest {
    /// Creates a digest from raw bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Returns the digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the digest length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the digest has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parses a digest from a hex string.
    ///
    /// Returns `None` if the string is not valid hex.
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        hex::decode(hex_str).ok().map(Self::new)
    }

    /// Consumes the digest and returns the underlying bytes.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Digest {
    fn from(bytes: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(bytes))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let digest = Digest::new(vec![1u8, 2, 3]);
        assert_eq!(digest.as_bytes(), &[1, 2, 3]);
        assert_eq!(digest.len(), 3);
        assert!(!digest.is_empty());
    }

    #[test]
    fn test_hex_roundtrip() {
        let digest = Digest::from_hex("900150983cd24fb0d6963f7d28e17f72").unwrap();
        assert_eq!(digest.len(), 16);
        assert_eq!(digest.to_hex(), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Digest::from_hex("xyz").is_none());
        assert!(Digest::from_hex("abc").is_none());
    }

    #[test]
    fn test_display_matches_hex() {
        let digest = Digest::from(&[0x01u8, 0x23, 0xAB, 0xEF][..]);
        assert_eq!(digest.to_string(), "0123abef");
        assert_eq!(digest.to_string(), digest.to_hex());
        assert_eq!(Digest::from(Vec::new()).to_string(), "");
    }
}
