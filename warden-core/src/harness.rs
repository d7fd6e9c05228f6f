//! Worker partitioning and parallel execution backends.
//!
//! The harness splits a total trial count into near-equal shares, runs one
//! worker per share, and hands the per-worker success counts back to the
//! caller for aggregation. Two parallel backends are provided:
//!
//! - [`run_threads`] spawns one OS thread per worker. Each worker writes
//!   its count into its own disjoint slot of a pre-allocated buffer (the
//!   slices are split before spawning, so exclusive ownership is enforced
//!   by the borrow checker), and joining every handle is the barrier that
//!   orders all slot writes before the harness reads any of them.
//! - [`run_rayon`] maps shares over a work-stealing pool and collects the
//!   counts, trading the slot buffer for message passing.
//!
//! Both must be statistically indistinguishable from [`run_sequential`].

use std::sync::Arc;
use std::thread;

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, WardenError};

/// One worker's assignment: its slot index and the trials it must run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WorkerTask {
    pub(crate) worker_id: usize,
    pub(crate) trials: u64,
}

/// Splits `total` into `workers` near-equal shares.
///
/// The remainder is spread one extra trial each over the leading workers,
/// so the shares always sum to `total` and differ by at most one.
pub(crate) fn split_shares(total: u64, workers: usize) -> Vec<u64> {
    let workers = workers as u64;
    let share = total / workers;
    let remainder = total % workers;
    (0..workers)
        .map(|worker| if worker < remainder { share + 1 } else { share })
        .collect()
}

/// Runs every share on the calling thread, in slot order.
pub(crate) fn run_sequential<F>(shares: &[u64], worker: F) -> Result<Vec<u64>>
where
    F: Fn(WorkerTask) -> Result<u64>,
{
    shares
        .iter()
        .enumerate()
        .map(|(worker_id, &trials)| worker(WorkerTask { worker_id, trials }))
        .collect()
}

/// Runs one dedicated OS thread per share.
///
/// Any spawn refusal, worker error, or worker panic fails the whole run;
/// there is no partial-result fallback.
pub(crate) fn run_threads<F>(shares: &[u64], worker: F) -> Result<Vec<u64>>
where
    F: Fn(WorkerTask) -> Result<u64> + Sync,
{
    let mut slots = vec![0u64; shares.len()];
    let worker = &worker;
    thread::scope(|scope| -> Result<()> {
        let mut handles = Vec::with_capacity(shares.len());
        for (worker_id, (&trials, slot)) in shares.iter().zip(slots.iter_mut()).enumerate() {
            let task = WorkerTask { worker_id, trials };
            let handle = thread::Builder::new()
                .name(format!("warden-worker-{worker_id}"))
                .spawn_scoped(scope, move || -> Result<()> {
                    *slot = worker(task)?;
                    Ok(())
                })
                .map_err(|err| WardenError::WorkerSpawn {
                    worker: worker_id,
                    message: Arc::from(err.to_string()),
                })?;
            handles.push((worker_id, handle));
        }
        // joining every handle is the barrier: no slot is read until every
        // worker has completed
        for (worker_id, handle) in handles {
            match handle.join() {
                Ok(outcome) => outcome?,
                Err(_) => return Err(WardenError::WorkerPanicked { worker: worker_id }),
            }
        }
        Ok(())
    })?;
    debug!(workers = shares.len(), "all workers joined");
    Ok(slots)
}

/// Maps shares over the rayon pool and collects per-worker counts.
pub(crate) fn run_rayon<F>(shares: &[u64], worker: F) -> Result<Vec<u64>>
where
    F: Fn(WorkerTask) -> Result<u64> + Sync,
{
    shares
        .par_iter()
        .enumerate()
        .map(|(worker_id, &trials)| worker(WorkerTask { worker_id, trials }))
        .collect()
}
