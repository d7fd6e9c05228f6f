//! Simulation orchestration: runs the estimator across execution backends.
//!
//! Provides the [`Simulation`] entry point that partitions trials over
//! workers, seeds each worker independently, and aggregates per-worker
//! success counts into a single [`EstimatorResult`].

use std::num::NonZeroUsize;

use tracing::{debug, info, instrument};

use crate::{
    builder::ExecutionMode,
    error::Result,
    estimator::{self, EstimatorResult},
    harness::{self, WorkerTask},
    rng,
    trial::TrialEngine,
};

/// Entry point for estimating the success probability of the box-opening
/// strategy.
///
/// Constructed through [`crate::SimulationBuilder`]; all bounds are
/// validated there, so a built simulation can be run repeatedly.
///
/// # Examples
/// ```
/// use warden_core::SimulationBuilder;
///
/// let simulation = SimulationBuilder::new()
///     .build()
///     .expect("builder configuration is valid");
/// let result = simulation.estimate(1_000).expect("run must succeed");
/// assert_eq!(result.trials(), 1_000);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    prisoners: NonZeroUsize,
    max_opens: NonZeroUsize,
    capacity: usize,
    workers: NonZeroUsize,
    execution_mode: ExecutionMode,
}

impl Simulation {
    pub(crate) fn new(
        prisoners: NonZeroUsize,
        max_opens: NonZeroUsize,
        capacity: usize,
        workers: NonZeroUsize,
        execution_mode: ExecutionMode,
    ) -> Self {
        Self {
            prisoners,
            max_opens,
            capacity,
            workers,
            execution_mode,
        }
    }

    /// Returns the number of prisoners simulated per trial.
    #[must_use]
    pub fn prisoners(&self) -> NonZeroUsize {
        self.prisoners
    }

    /// Returns the box-open budget per prisoner.
    #[must_use]
    pub fn max_opens(&self) -> NonZeroUsize {
        self.max_opens
    }

    /// Returns the disjoint-set engine capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of concurrent workers.
    #[must_use]
    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    /// Returns the execution mode used when running.
    #[must_use]
    pub fn execution_mode(&self) -> ExecutionMode {
        self.execution_mode
    }

    /// Estimates the success probability over `trials` independent trials.
    ///
    /// Trials are split into near-equal shares, one per worker; every
    /// worker seeds its own generator from OS entropy, runs the estimator
    /// over its share, and the counts are summed once all workers have
    /// completed. The result always covers exactly `trials` trials.
    ///
    /// # Errors
    /// Returns [`crate::WardenError::EntropyUnavailable`] when any worker
    /// fails to seed, and [`crate::WardenError::WorkerSpawn`] or
    /// [`crate::WardenError::WorkerPanicked`] when the thread backend
    /// cannot complete every worker. All of these abort the whole run.
    #[instrument(
        name = "core.estimate",
        err,
        skip(self),
        fields(
            trials,
            prisoners = %self.prisoners,
            max_opens = %self.max_opens,
            workers = %self.workers,
            mode = ?self.execution_mode,
        ),
    )]
    pub fn estimate(&self, trials: u64) -> Result<EstimatorResult> {
        let counts = match self.execution_mode {
            ExecutionMode::Sequential => {
                harness::run_sequential(&[trials], |task| self.run_worker(task))
            }
            ExecutionMode::Threads => {
                let shares = harness::split_shares(trials, self.workers.get());
                harness::run_threads(&shares, |task| self.run_worker(task))
            }
            ExecutionMode::Rayon => {
                let shares = harness::split_shares(trials, self.workers.get());
                harness::run_rayon(&shares, |task| self.run_worker(task))
            }
        }?;

        let successes: u64 = counts.iter().sum();
        let result = EstimatorResult::from_counts(successes, trials);
        info!(successes, mean = result.mean(), "estimation completed");
        Ok(result)
    }

    /// Runs one worker: seed, estimate the share, report the count.
    fn run_worker(&self, task: WorkerTask) -> Result<u64> {
        let mut rng = rng::from_entropy()?;
        let mut engine = TrialEngine::new(
            self.prisoners.get(),
            self.max_opens.get(),
            self.capacity,
        )?;
        debug!(
            worker = task.worker_id,
            trials = task.trials,
            "worker seeded and running"
        );
        let share = estimator::estimate(task.trials, || engine.run(&mut rng));
        Ok(share.successes())
    }
}
