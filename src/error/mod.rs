//! Error types for multidigest.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DigestError>;

/// Errors that can occur while computing digests.
///
/// Every variant aborts the whole call: no partial digest sequence is ever
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum DigestError {
    /// An I/O error occurred while reading the source stream.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The source file could not be opened.
    #[error("cannot open '{}': {source}", .path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// An accumulator failed to consume a chunk.
    #[error("accumulator {index} failed to consume data: {source}")]
    Write {
        /// Position of the failing accumulator in the call's argument list.
        index: usize,
        /// Error reported by the accumulator.
        #[source]
        source: io::Error,
    },

    /// The worker thread for an accumulator could not be started.
    #[error("cannot spawn worker for accumulator {index}: {source}")]
    Spawn {
        /// Position of the accumulator left without a worker.
        index: usize,
        /// Error reported by the OS.
        #[source]
        source: io::Error,
    },

    /// An accumulator panicked while consuming or finalizing.
    #[error("accumulator {index} panicked")]
    WorkerPanicked {
        /// Position of the panicking accumulator.
        index: usize,
    },

    /// A pooled buffer did not have the pool's capacity.
    ///
    /// This indicates a bug in the pool, never a transient condition.
    #[error("buffer pool invariant violated: expected {expected} byte buffer, got {actual}")]
    BufferContract {
        /// Capacity the pool hands out.
        expected: usize,
        /// Length of the buffer actually found in the pool.
        actual: usize,
    },

    /// The requested digest algorithm is unknown or was compiled out.
    #[error("hash function not available: {algorithm}")]
    Unavailable {
        /// Name of the requested algorithm.
        algorithm: String,
    },

    /// The computation was cancelled through a [`CancelToken`](crate::CancelToken).
    #[error("digest computation cancelled")]
    Cancelled,

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl DigestError {
    /// Returns `true` if this error means a digest algorithm could not be
    /// instantiated, whatever name was requested.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DigestError::Unavailable { .. })
    }

    /// Returns `true` for errors that originate in the source stream rather
    /// than in an accumulator or the engine.
    pub fn is_io(&self) -> bool {
        matches!(self, DigestError::Io(_) | DigestError::Open { .. })
    }

    pub(crate) fn unavailable(algorithm: impl Into<String>) -> Self {
        DigestError::Unavailable {
            algorithm: algorithm.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: DigestError = io_err.into();
        assert!(matches!(err, DigestError::Io(_)));
        assert!(err.is_io());
    }

    #[test]
    fn test_unavailable_is_structural() {
        let err = DigestError::unavailable("whirlpool");
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("hash function not available"));
        assert!(!DigestError::Cancelled.is_unavailable());
    }

    #[test]
    fn test_write_error_keeps_source() {
        let err = DigestError::Write {
            index: 2,
            source: io::Error::other("disk full"),
        };
        assert!(err.to_string().contains("accumulator 2"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_spawn_failure_is_not_a_source_error() {
        let err = DigestError::Spawn {
            index: 3,
            source: io::Error::new(io::ErrorKind::WouldBlock, "thread limit"),
        };
        assert!(!err.is_io());
        assert!(err.to_string().contains("accumulator 3"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display_buffer_contract() {
        let err = DigestError::BufferContract {
            expected: 65536,
            actual: 10,
        };
        assert!(err.to_string().contains("invariant"));
    }
}
