//! Shared buffer pool for memory reuse across calls.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crossbeam::queue::ArrayQueue;

use crate::config::PoolConfig;
use crate::error::DigestError;

/// A pool of fixed-capacity byte buffers.
///
/// The pool is an ordinary value: construct it, wrap it in an
/// [`Arc`](std::sync::Arc) and hand it to as many
/// [`MultiHasher`](crate::MultiHasher)s as should share it. `acquire` and
/// `release` are lock-free and may be called from any number of threads.
///
/// At most [`PoolConfig::max_pooled`] idle buffers are kept. An empty pool
/// allocates, a full pool frees whatever is released to it.
///
/// # Example
///
/// ```
/// use multidigest::{BufferPool, PoolConfig};
///
/// let pool = BufferPool::new(PoolConfig::default().with_buffer_size(1024))?;
/// let lease = pool.acquire()?;
/// assert_eq!(lease.len(), 1024);
/// pool.release(lease);
/// assert_eq!(pool.available(), 1);
/// # Ok::<(), multidigest::DigestError>(())
/// ```
pub struct BufferPool {
    config: PoolConfig,
    free: ArrayQueue<Box<[u8]>>,
}

impl BufferPool {
    /// Creates an empty pool.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: PoolConfig) -> Result<Self, DigestError> {
        config.validate()?;
        Ok(Self {
            config,
            free: ArrayQueue::new(config.max_pooled()),
        })
    }

    /// Leases a buffer of [`buffer_size`](Self::buffer_size) bytes.
    ///
    /// Contents are whatever a previous lease left behind.
    pub fn acquire(&self) -> Result<BufferLease<'_>, DigestError> {
        let expected = self.config.buffer_size();
        let data = match self.free.pop() {
            Some(data) if data.len() == expected => data,
            Some(data) => {
                return Err(DigestError::BufferContract {
                    expected,
                    actual: data.len(),
                });
            }
            None => vec![0u8; expected].into_boxed_slice(),
        };

        Ok(BufferLease {
            pool: self,
            data: Some(data),
        })
    }

    /// Returns a lease to the pool. Equivalent to dropping it.
    pub fn release(&self, lease: BufferLease<'_>) {
        drop(lease);
    }

    /// Returns the capacity of every buffer this pool hands out.
    pub fn buffer_size(&self) -> usize {
        self.config.buffer_size()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the number of idle buffers currently pooled.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    fn put(&self, data: Box<[u8]>) {
        if data.len() != self.config.buffer_size() {
            return;
        }
        // Full pool: let the buffer go.
        let _ = self.free.push(data);
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self {
            config: PoolConfig::default(),
            free: ArrayQueue::new(PoolConfig::default().max_pooled()),
        }
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.config)
            .field("available", &self.free.len())
            .finish()
    }
}

/// A buffer leased from a [`BufferPool`].
///
/// Dereferences to the full-capacity byte slice. Returned to the pool on drop.
pub struct BufferLease<'a> {
    pool: &'a BufferPool,
    data: Option<Box<[u8]>>,
}

impl Deref for BufferLease<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data.as_deref().unwrap_or_default()
    }
}

impl DerefMut for BufferLease<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.data.as_deref_mut().unwrap_or_default()
    }
}

impl Drop for BufferLease<'_> {
    fn drop(&mut self) {
        if let Some(data) = self.data.take() {
            self.pool.put(data);
        }
    }
}

impl fmt::Debug for BufferLease<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferLease").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn small_pool(max_pooled: usize) -> BufferPool {
        BufferPool::new(PoolConfig::new(16, max_pooled).unwrap()).unwrap()
    }

    #[test]
    fn test_acquire_has_capacity() {
        let pool = BufferPool::default();
        let lease = pool.acquire().unwrap();
        assert_eq!(lease.len(), crate::config::DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_release_and_reuse() {
        let pool = small_pool(4);
        {
            let mut lease = pool.acquire().unwrap();
            lease[..4].copy_from_slice(b"test");
        }
        assert_eq!(pool.available(), 1);

        // Contents are not cleared between leases
        let lease = pool.acquire().unwrap();
        assert_eq!(&lease[..4], b"test");
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_full_pool_frees_excess() {
        let pool = small_pool(1);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        pool.release(a);
        pool.release(b);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_misshapen_buffer_is_contract_violation() {
        let pool = small_pool(2);
        pool.free.push(vec![0u8; 3].into_boxed_slice()).unwrap();
        let err = pool.acquire().unwrap_err();
        assert!(matches!(
            err,
            DigestError::BufferContract {
                expected: 16,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_concurrent_acquire_release() {
        let pool = Arc::new(small_pool(4));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let mut lease = pool.acquire().unwrap();
                        lease.fill(i);
                        assert!(lease.iter().all(|&b| b == i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(pool.available() <= 4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(BufferPool::new(PoolConfig::default().with_max_pooled(0)).is_err());
    }
}
