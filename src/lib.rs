//! multidigest
//!
//! Many digests, one read pass.
//!
//! `multidigest` computes several hashes or checksums of the same stream while
//! reading it only once. It is designed as a small, composable primitive for:
//!
//! - integrity checks that publish MD5, SHA-1 and SHA-256 side by side
//! - content-addressable storage keyed by more than one hash
//! - verifying large files without paying the I/O cost per algorithm
//!
//! The source is read strictly sequentially into one pooled buffer. Each chunk
//! is handed to every accumulator in parallel, one thread per accumulator, and
//! the next read waits until all of them are done with the current chunk.
//!
//! The crate intentionally:
//! - does NOT parallelize reads
//! - does NOT return digests before end of stream
//! - does NOT resume partial computations
//! - does NOT keep process-wide state (pools are ordinary values)
//!
//! # Example
//!
//! ```no_run
//! use multidigest::{Algorithm, DigestError, MultiHasher};
//!
//! fn main() -> Result<(), DigestError> {
//!     let hasher = MultiHasher::default();
//!     let digests = hasher.digest_path(
//!         "data.bin",
//!         &[Algorithm::Md5, Algorithm::Sha1, Algorithm::Sha256],
//!     )?;
//!
//!     for digest in digests {
//!         println!("{digest}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Custom accumulators
//!
//! Anything implementing [`Accumulator`] can be mixed with the built-in
//! algorithms; any RustCrypto hasher fits through [`DigestAccumulator`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod engine;
mod error;
mod hash;
mod output;

mod util; // internal read helpers

//
// Public surface
//

pub use buffer::{BufferLease, BufferPool};
pub use config::{DEFAULT_BUFFER_SIZE, DEFAULT_MAX_POOLED, PoolConfig};
pub use engine::{CancelToken, MultiHasher};
pub use error::{DigestError, Result};
pub use hash::{Accumulator, Algorithm, DigestAccumulator};
pub use output::Digest;

#[cfg(feature = "blake3")]
pub use hash::Blake3Accumulator;
