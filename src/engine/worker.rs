//! Per-accumulator worker.
//!
//! A worker owns one accumulator for the lifetime of a session and folds every
//! chunk the orchestrator announces into it, in announcement order.

use std::io;
use std::ops::Deref;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{PoisonError, RwLock};

use crossbeam::channel::{Receiver, Sender};
use tracing::trace;

use crate::engine::CancelToken;
use crate::hash::Accumulator;
use crate::output::Digest;

/// Orchestrator to worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    /// The shared buffer holds this many valid bytes.
    Chunk(usize),
    /// End of stream: finalize and exit.
    Finish,
}

/// Worker to orchestrator, one per [`Signal::Chunk`].
#[derive(Debug)]
pub(crate) enum Ack {
    Consumed,
    /// The session was cancelled before this worker touched the chunk.
    Skipped,
    Failed(io::Error),
    Panicked,
}

#[derive(Debug)]
pub(crate) struct Report {
    pub(crate) index: usize,
    pub(crate) ack: Ack,
}

pub(crate) struct Worker<'s, B> {
    index: usize,
    accumulator: Box<dyn Accumulator>,
    buffer: &'s RwLock<B>,
    signals: Receiver<Signal>,
    acks: Sender<Report>,
    abort: &'s CancelToken,
    caller: Option<&'s CancelToken>,
}

impl<'s, B: Deref<Target = [u8]>> Worker<'s, B> {
    pub(crate) fn new(
        index: usize,
        accumulator: Box<dyn Accumulator>,
        buffer: &'s RwLock<B>,
        signals: Receiver<Signal>,
        acks: Sender<Report>,
        abort: &'s CancelToken,
        caller: Option<&'s CancelToken>,
    ) -> Self {
        Self {
            index,
            accumulator,
            buffer,
            signals,
            acks,
            abort,
            caller,
        }
    }

    /// Processes signals until `Finish` or disconnection.
    ///
    /// Returns the digest on `Finish`. A disconnected signal channel means the
    /// session aborted; the accumulator is dropped without finalizing.
    pub(crate) fn run(mut self) -> Option<Digest> {
        while let Ok(signal) = self.signals.recv() {
            match signal {
                Signal::Chunk(len) => {
                    let ack = self.consume(len);
                    let report = Report {
                        index: self.index,
                        ack,
                    };
                    if self.acks.send(report).is_err() {
                        break;
                    }
                }
                Signal::Finish => {
                    trace!(index = self.index, "finalizing");
                    return Some(self.accumulator.finalize());
                }
            }
        }

        trace!(index = self.index, "worker stopped without finalizing");
        None
    }

    fn consume(&mut self, len: usize) -> Ack {
        if self.abort.is_cancelled() || self.caller.is_some_and(CancelToken::is_cancelled) {
            return Ack::Skipped;
        }

        let guard = self.buffer.read().unwrap_or_else(PoisonError::into_inner);
        let chunk = &(**guard)[..len];
        let accumulator = &mut self.accumulator;

        match panic::catch_unwind(AssertUnwindSafe(|| accumulator.consume(chunk))) {
            Ok(Ok(())) => Ack::Consumed,
            Ok(Err(e)) => {
                self.abort.cancel();
                Ack::Failed(e)
            }
            Err(_) => {
                self.abort.cancel();
                Ack::Panicked
            }
        }
    }
}
