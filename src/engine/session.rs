//! One multi-digest call: read loop, fan-out, barrier and collection.
//!
//! The orchestrator owns a single leased buffer. Each round it takes the
//! write lock, reads one chunk, releases the lock, announces the chunk length
//! to every worker and then waits until every worker has acknowledged. Only
//! after that barrier is the buffer written again, so workers never observe a
//! chunk being overwritten and the lock is never contended.
//!
//! Every exit path disconnects all signal channels and joins every worker
//! before the buffer lease is dropped.

use std::io::Read;
use std::ops::DerefMut;
use std::sync::{PoisonError, RwLock};
use std::thread::{self, ScopedJoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use tracing::{debug, trace, warn};

use crate::buffer::BufferPool;
use crate::engine::CancelToken;
use crate::engine::worker::{Ack, Report, Signal, Worker};
use crate::error::{DigestError, Result};
use crate::hash::Accumulator;
use crate::output::Digest;
use crate::util::read_retrying;

/// Runs one session to completion.
pub(crate) fn run<R: Read>(
    pool: &BufferPool,
    mut reader: R,
    accumulators: Vec<Box<dyn Accumulator>>,
    caller: Option<&CancelToken>,
) -> Result<Vec<Digest>> {
    let count = accumulators.len();
    let lock = RwLock::new(pool.acquire()?);
    let abort = CancelToken::new();
    let buffer = &lock;
    let abort = &abort;

    debug!(
        accumulators = count,
        buffer_size = pool.buffer_size(),
        "starting digest session"
    );

    thread::scope(|scope| {
        let (ack_tx, ack_rx) = channel::bounded(count);
        let mut signals = Vec::with_capacity(count);
        let mut handles = Vec::with_capacity(count);
        let mut spawned = Ok(());

        for (index, accumulator) in accumulators.into_iter().enumerate() {
            let (signal_tx, signal_rx) = channel::bounded(1);
            let worker = Worker::new(
                index,
                accumulator,
                buffer,
                signal_rx,
                ack_tx.clone(),
                abort,
                caller,
            );
            let handle = thread::Builder::new()
                .name(format!("multidigest-worker-{index}"))
                .spawn_scoped(scope, move || worker.run());
            match handle {
                Ok(handle) => {
                    handles.push(handle);
                    signals.push(signal_tx);
                }
                Err(source) => {
                    spawned = Err(DigestError::Spawn { index, source });
                    break;
                }
            }
        }
        drop(ack_tx);

        let outcome = spawned.and_then(|()| stream(&mut reader, buffer, &signals, &ack_rx, caller));

        if outcome.is_ok() {
            for signal in &signals {
                // A worker that is already gone surfaces when joined.
                let _ = signal.send(Signal::Finish);
            }
        }
        drop(signals);

        let collected = collect(handles);

        let total = outcome.inspect_err(|e| warn!(error = %e, "digest session aborted"))?;
        let digests = collected.inspect_err(|e| warn!(error = %e, "digest collection failed"))?;

        debug!(bytes = total, digests = digests.len(), "digest session complete");
        Ok(digests)
    })
}

/// The read/broadcast/barrier loop. Returns the number of bytes read.
fn stream<R, B>(
    reader: &mut R,
    buffer: &RwLock<B>,
    signals: &[Sender<Signal>],
    acks: &Receiver<Report>,
    caller: Option<&CancelToken>,
) -> Result<u64>
where
    R: Read,
    B: DerefMut<Target = [u8]>,
{
    let mut total = 0u64;
    let mut round = 0u64;
    let mut pending = Vec::with_capacity(signals.len());

    loop {
        if caller.is_some_and(CancelToken::is_cancelled) {
            return Err(DigestError::Cancelled);
        }

        let len = {
            let mut guard = buffer.write().unwrap_or_else(PoisonError::into_inner);
            read_retrying(reader, &mut **guard)?
        };
        if len == 0 {
            return Ok(total);
        }
        total += len as u64;

        for (index, signal) in signals.iter().enumerate() {
            signal
                .send(Signal::Chunk(len))
                .map_err(|_| DigestError::WorkerPanicked { index })?;
        }

        barrier(acks, signals.len(), &mut pending)?;

        trace!(round, len, total, "round complete");
        round += 1;
    }
}

/// Waits for one acknowledgment per worker. Returns the first failure.
///
/// `pending` is scratch space reused across rounds.
fn barrier(acks: &Receiver<Report>, expected: usize, pending: &mut Vec<bool>) -> Result<()> {
    pending.clear();
    pending.resize(expected, true);
    let mut failure = None;
    let mut skipped = false;

    for _ in 0..expected {
        let Ok(report) = acks.recv() else {
            break;
        };
        pending[report.index] = false;

        match report.ack {
            Ack::Consumed => {}
            Ack::Skipped => skipped = true,
            Ack::Failed(source) => {
                failure.get_or_insert(DigestError::Write {
                    index: report.index,
                    source,
                });
            }
            Ack::Panicked => {
                failure.get_or_insert(DigestError::WorkerPanicked {
                    index: report.index,
                });
            }
        }
    }

    if let Some(index) = pending.iter().position(|&p| p) {
        failure.get_or_insert(DigestError::WorkerPanicked { index });
    }
    // A chunk skipped without a worker failure means the caller cancelled.
    if skipped {
        failure.get_or_insert(DigestError::Cancelled);
    }

    failure.map_or(Ok(()), Err)
}

/// Joins every worker in argument order.
fn collect(handles: Vec<ScopedJoinHandle<'_, Option<Digest>>>) -> Result<Vec<Digest>> {
    let mut digests = Vec::with_capacity(handles.len());
    let mut failure = None;

    for (index, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(Some(digest)) => digests.push(digest),
            Ok(None) | Err(_) => {
                failure.get_or_insert(DigestError::WorkerPanicked { index });
            }
        }
    }

    failure.map_or(Ok(digests), Err)
}
