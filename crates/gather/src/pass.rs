//! # Parallel Extraction Pass
//!
//! ```text
//!                 ┌──────────── SyncReader<'_, I> ────────────┐
//!   inputs ──────>│  atomic cursor: each input claimed once   │
//!                 └──────┬───────────────┬───────────────┬────┘
//!                        ▼               ▼               ▼
//!                    worker 0        worker 1   ...  worker N-1
//!                   extract()       extract()        extract()
//!                   local batch     local batch      local batch
//!                        │               │               │
//!                        └──── try_append_bulk ──────────┘
//!                                        ▼
//!                              SyncWriter<'_, O> ──> sink
//! ```
//!
//! Workers only touch the writer lock once per `batch_capacity` outputs.
//! All workers are joined before [`run_pass`] returns, so the sink is
//! stable and ready for a read phase afterwards.

use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use gather_core::{SyncReader, SyncWriter};

use crate::config::PassConfig;
use crate::error::{GatherError, GatherResult};

/// What a single worker did during a pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkerReport {
    /// Worker index.
    pub worker: usize,
    /// Inputs this worker claimed from the cursor.
    pub inputs: usize,
    /// Outputs this worker flushed into the sink.
    pub outputs: usize,
    /// Bulk appends this worker performed.
    pub flushes: usize,
}

/// Totals for a completed pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Workers started.
    pub workers: usize,
    /// Inputs processed (always the full input count on success).
    pub inputs: usize,
    /// Outputs appended to the sink by this pass.
    pub outputs: usize,
    /// Bulk appends across all workers.
    pub flushes: usize,
    /// Wall-clock time from first spawn to last join.
    pub elapsed: Duration,
    /// Per-worker breakdown, ordered by worker index.
    pub reports: Vec<WorkerReport>,
}

/// Runs `extract` over every input on a pool of scoped worker threads,
/// collecting all outputs into `sink`.
///
/// Each input is handed to exactly one worker. `extract` pushes any number
/// of outputs into the batch it is given. Outputs land after whatever
/// `sink` already held; batches from different workers may interleave, but
/// one flushed batch is never split.
///
/// # Errors
///
/// - [`GatherError::InvalidConfig`] if `config` fails validation
/// - [`GatherError::Spawn`] if a worker thread cannot be started
/// - [`GatherError::WorkerPanicked`] if `extract` panics on any worker
/// - [`GatherError::Core`] if the sink cannot grow
///
/// On error the sink may already hold outputs from batches flushed before
/// the failure.
pub fn run_pass<I, O, F>(
    config: &PassConfig,
    inputs: &[I],
    sink: &mut Vec<O>,
    extract: F,
) -> GatherResult<PassStats>
where
    I: Sync,
    O: Send,
    F: Fn(&I, &mut Vec<O>) + Sync,
{
    config.validate()?;
    let workers = config.resolved_workers(inputs.len());
    let batch_capacity = config.batch_capacity;

    let reader = SyncReader::new(inputs);
    let writer = SyncWriter::new(sink);
    let started = Instant::now();

    tracing::debug!(
        workers,
        inputs = inputs.len(),
        batch_capacity,
        "starting gather pass"
    );

    let results = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let reader = &reader;
            let writer = &writer;
            let extract = &extract;
            let spawned = thread::Builder::new()
                .name(format!("{}-{worker}", config.thread_name))
                .spawn_scoped(scope, move || {
                    drain(worker, reader, writer, extract, batch_capacity)
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    // Join what is already running so a worker panic cannot
                    // escape the scope and mask the spawn failure.
                    drop(join_workers(handles));
                    return Err(GatherError::Spawn {
                        worker,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(join_workers(handles))
    })?;

    let elapsed = started.elapsed();
    let reports = results.into_iter().collect::<GatherResult<Vec<_>>>()?;

    let stats = PassStats {
        workers,
        inputs: reports.iter().map(|r| r.inputs).sum(),
        outputs: reports.iter().map(|r| r.outputs).sum(),
        flushes: reports.iter().map(|r| r.flushes).sum(),
        elapsed,
        reports,
    };

    tracing::info!(
        "Gather pass finished: {} inputs -> {} outputs on {} workers ({} flushes) in {:?}",
        stats.inputs,
        stats.outputs,
        stats.workers,
        stats.flushes,
        stats.elapsed
    );

    Ok(stats)
}

/// Joins every worker in index order. A panicked worker becomes
/// [`GatherError::WorkerPanicked`] instead of propagating out of the scope.
fn join_workers(
    handles: Vec<ScopedJoinHandle<'_, GatherResult<WorkerReport>>>,
) -> Vec<GatherResult<WorkerReport>> {
    handles
        .into_iter()
        .enumerate()
        .map(|(worker, handle)| {
            handle.join().unwrap_or_else(|_| {
                tracing::warn!(worker, "gather worker panicked");
                Err(GatherError::WorkerPanicked { worker })
            })
        })
        .collect()
}

/// Worker loop: claim inputs until the cursor is exhausted, flushing the
/// local batch whenever it fills up and once more at the end.
fn drain<I, O, F>(
    worker: usize,
    reader: &SyncReader<'_, I>,
    writer: &SyncWriter<'_, O>,
    extract: &F,
    batch_capacity: usize,
) -> GatherResult<WorkerReport>
where
    F: Fn(&I, &mut Vec<O>),
{
    let mut report = WorkerReport {
        worker,
        ..WorkerReport::default()
    };
    let mut batch = Vec::with_capacity(batch_capacity);

    for input in reader.claims() {
        extract(input, &mut batch);
        report.inputs += 1;
        if batch.len() >= batch_capacity {
            let full = std::mem::replace(&mut batch, Vec::with_capacity(batch_capacity));
            flush(writer, full, &mut report)?;
        }
    }
    if !batch.is_empty() {
        flush(writer, batch, &mut report)?;
    }

    tracing::debug!(
        worker,
        inputs = report.inputs,
        outputs = report.outputs,
        flushes = report.flushes,
        "gather worker drained"
    );
    Ok(report)
}

fn flush<O>(
    writer: &SyncWriter<'_, O>,
    batch: Vec<O>,
    report: &mut WorkerReport,
) -> GatherResult<()> {
    let count = batch.len();
    writer.try_append_bulk(batch)?;
    report.outputs += count;
    report.flushes += 1;
    Ok(())
}
