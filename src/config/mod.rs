//! Configuration for buffer pooling.
//!
//! - [`PoolConfig`] - Buffer capacity and how many idle buffers to retain
//!
//! # Example
//!
//! ```
//! use multidigest::PoolConfig;
//!
//! // Larger reads for fast storage
//! let config = PoolConfig::new(256 * 1024, 8)?;
//!
//! // Builder pattern
//! let config = PoolConfig::default().with_max_pooled(32);
//! # Ok::<(), multidigest::DigestError>(())
//! ```

use crate::error::DigestError;

/// Default buffer capacity (64 KiB).
///
/// A power of two keeps reads aligned with filesystem blocks; 2^16 amortizes
/// per-read syscall overhead on spinning disks while keeping peak memory per
/// call small.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Default number of idle buffers a pool keeps for reuse.
pub const DEFAULT_MAX_POOLED: usize = 16;

/// Configuration for a [`BufferPool`](crate::BufferPool).
///
/// The buffer size is the chunk size of every read. It has no effect on the
/// digests produced, only on throughput and memory use.
///
/// # Example
///
/// ```
/// use multidigest::PoolConfig;
///
/// let config = PoolConfig::default();
/// assert_eq!(config.buffer_size(), 64 * 1024);
///
/// let config = PoolConfig::default().with_buffer_size(4096);
/// assert_eq!(config.buffer_size(), 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// Capacity of each pooled buffer in bytes.
    buffer_size: usize,

    /// Maximum number of idle buffers retained.
    max_pooled: usize,
}

impl PoolConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidConfig`] if either value is zero.
    pub fn new(buffer_size: usize, max_pooled: usize) -> Result<Self, DigestError> {
        if buffer_size == 0 {
            return Err(DigestError::InvalidConfig {
                message: "buffer size must be non-zero",
            });
        }

        if max_pooled == 0 {
            return Err(DigestError::InvalidConfig {
                message: "pool must retain at least one buffer",
            });
        }

        Ok(Self {
            buffer_size,
            max_pooled,
        })
    }

    /// Sets the buffer capacity.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check it.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets the number of idle buffers retained.
    pub fn with_max_pooled(mut self, count: usize) -> Self {
        self.max_pooled = count;
        self
    }

    /// Returns the buffer capacity.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Returns the number of idle buffers retained.
    pub fn max_pooled(&self) -> usize {
        self.max_pooled
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), DigestError> {
        Self::new(self.buffer_size, self.max_pooled).map(|_| ())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_pooled: DEFAULT_MAX_POOLED,
        }
    }
}
