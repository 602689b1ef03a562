//! Buffer management for read reuse.
//!
//! [`BufferPool`] hands out fixed-capacity buffers that are shared across
//! calls and threads. A [`BufferLease`] returns its buffer on drop.

mod pool;

pub use pool::{BufferLease, BufferPool};
