//! Public entry points - MultiHasher.
//!
//! # Example
//!
//! ```
//! use multidigest::{Algorithm, MultiHasher};
//! use std::io::Cursor;
//!
//! let hasher = MultiHasher::default();
//! let digests = hasher.digest_reader(Cursor::new(b"abc"), &[Algorithm::Md5, Algorithm::Sha1])?;
//!
//! assert_eq!(digests[0].to_hex(), "900150983cd24fb0d6963f7d28e17f72");
//! assert_eq!(digests[1].to_hex(), "a9993e364706816aba3e25717850c26c9cd0d89d");
//! # Ok::<(), multidigest::DigestError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::buffer::BufferPool;
use crate::engine::{CancelToken, session};
use crate::error::{DigestError, Result};
use crate::hash::{Accumulator, Algorithm};
use crate::output::Digest;

/// Computes several digests of one stream in a single read pass.
///
/// `MultiHasher` holds a shared [`BufferPool`] and, optionally, a
/// [`CancelToken`]. It is cheap to clone; clones share the pool, so any number
/// of threads can run calls concurrently.
///
/// Each call reads the source sequentially, chunk by chunk, and feeds every
/// chunk to all accumulators in parallel, one thread per accumulator. The
/// digests come back in the order the accumulators were passed and do not
/// depend on the pool's buffer size.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use multidigest::{BufferPool, MultiHasher, PoolConfig};
///
/// let pool = Arc::new(BufferPool::new(PoolConfig::default().with_buffer_size(4096))?);
/// let a = MultiHasher::new(Arc::clone(&pool));
/// let b = MultiHasher::new(pool);
/// # Ok::<(), multidigest::DigestError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultiHasher {
    pool: Arc<BufferPool>,
    cancel: Option<CancelToken>,
}

impl MultiHasher {
    /// Creates a hasher drawing buffers from `pool`.
    pub fn new(pool: Arc<BufferPool>) -> Self {
        Self { pool, cancel: None }
    }

    /// Attaches a cancellation token checked at every chunk boundary.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Returns the shared buffer pool.
    pub fn pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }

    /// Digests everything `reader` yields until end of stream.
    ///
    /// `digests[i]` is the output of `accumulators[i]`. With no accumulators
    /// the reader is still drained and an empty vector is returned.
    ///
    /// # Errors
    ///
    /// - [`DigestError::Io`] if a read fails (interrupted reads are retried)
    /// - [`DigestError::Write`] if an accumulator rejects a chunk
    /// - [`DigestError::WorkerPanicked`] if an accumulator panics
    /// - [`DigestError::Spawn`] if a worker thread cannot be started
    /// - [`DigestError::Cancelled`] if the token fires mid-stream
    ///
    /// No digests are returned on error, and every worker thread has exited
    /// by the time this returns.
    pub fn hash_reader<R: Read>(
        &self,
        reader: R,
        accumulators: Vec<Box<dyn Accumulator>>,
    ) -> Result<Vec<Digest>> {
        session::run(&self.pool, reader, accumulators, self.cancel.as_ref())
    }

    /// Opens `path` and digests its contents.
    ///
    /// The file is closed on every exit path.
    ///
    /// # Errors
    ///
    /// [`DigestError::Open`] if the file cannot be opened, otherwise as
    /// [`hash_reader`](Self::hash_reader).
    pub fn hash_path(
        &self,
        path: impl AsRef<Path>,
        accumulators: Vec<Box<dyn Accumulator>>,
    ) -> Result<Vec<Digest>> {
        let file = open(path.as_ref())?;
        self.hash_reader(file, accumulators)
    }

    /// Digests `reader` with freshly instantiated `algorithms`.
    ///
    /// # Errors
    ///
    /// [`DigestError::Unavailable`] before any byte is read if an algorithm
    /// is compiled out, otherwise as [`hash_reader`](Self::hash_reader).
    pub fn digest_reader<R: Read>(&self, reader: R, algorithms: &[Algorithm]) -> Result<Vec<Digest>> {
        self.hash_reader(reader, instantiate(algorithms)?)
    }

    /// Digests the file at `path` with freshly instantiated `algorithms`.
    pub fn digest_path(
        &self,
        path: impl AsRef<Path>,
        algorithms: &[Algorithm],
    ) -> Result<Vec<Digest>> {
        let accumulators = instantiate(algorithms)?;
        self.hash_path(path, accumulators)
    }
}

fn instantiate(algorithms: &[Algorithm]) -> Result<Vec<Box<dyn Accumulator>>> {
    algorithms.iter().map(|algo| algo.accumulator()).collect()
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DigestError::Open {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_default_shares_nothing_global() {
        let a = MultiHasher::default();
        let b = MultiHasher::default();
        assert!(!Arc::ptr_eq(a.pool(), b.pool()));
    }

    #[test]
    fn test_clone_shares_pool() {
        let a = MultiHasher::default();
        let b = a.clone();
        assert!(Arc::ptr_eq(a.pool(), b.pool()));
    }

    #[cfg(feature = "sha2")]
    #[test]
    fn test_empty_stream_sha256() {
        let digests = MultiHasher::default()
            .digest_reader(Cursor::new(Vec::<u8>::new()), &[Algorithm::Sha256])
            .unwrap();
        assert_eq!(
            digests[0].to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = MultiHasher::default()
            .hash_path("/definitely/not/here", Vec::new())
            .unwrap_err();
        assert!(matches!(err, DigestError::Open { .. }));
        assert!(err.is_io());
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let err = MultiHasher::default()
            .with_cancel_token(token)
            .hash_reader(Cursor::new(b"data"), Vec::new())
            .unwrap_err();
        assert!(matches!(err, DigestError::Cancelled));
    }
}
