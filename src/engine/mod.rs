//! Single-pass multi-digest engine.
//!
//! - [`MultiHasher`] - Public entry points (reader, path, algorithms)
//! - [`CancelToken`] - Cooperative cancellation of in-flight calls
//!
//! Internally a session runs one orchestrator (the calling thread) and one
//! worker thread per accumulator, synchronised by a per-chunk barrier.

mod cancel;
mod hasher;
mod session;
mod worker;

pub use cancel::CancelToken;
pub use hasher::MultiHasher;
