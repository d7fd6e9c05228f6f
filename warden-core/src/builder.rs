//! Builder utilities for configuring simulations.
//!
//! Exposes the execution mode selection surface and the builder validation
//! performed before constructing [`Simulation`] instances.

use std::num::NonZeroUsize;

use crate::{
    error::{Result, WardenError},
    simulation::Simulation,
};

/// Number of prisoners (and boxes) in the classic puzzle.
pub const CLASSIC_PRISONERS: usize = 100;

/// Box-open budget in the classic puzzle: each prisoner may open at most
/// half the boxes.
pub const CLASSIC_MAX_OPENS: usize = 50;

/// Indicates how [`Simulation::estimate`] distributes trials across
/// workers.
///
/// The parallel backends are behaviourally equivalent from the estimator's
/// perspective; they differ only in how counts travel back to the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run every trial on the calling thread.
    Sequential,
    /// One dedicated OS thread per worker, counts collected through a
    /// slot buffer behind a join barrier.
    Threads,
    /// Rayon work-stealing pool, counts collected from the pool.
    Rayon,
}

/// Configures and constructs [`Simulation`] instances.
///
/// Defaults describe the classic puzzle: 100 prisoners, a budget of 50
/// opens, one worker, sequential execution.
///
/// # Examples
/// ```
/// use warden_core::{ExecutionMode, SimulationBuilder};
///
/// let simulation = SimulationBuilder::new()
///     .with_workers(4)
///     .with_execution_mode(ExecutionMode::Threads)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(simulation.workers().get(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    prisoners: usize,
    max_opens: usize,
    capacity: usize,
    workers: usize,
    execution_mode: ExecutionMode,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self {
            prisoners: CLASSIC_PRISONERS,
            max_opens: CLASSIC_MAX_OPENS,
            capacity: CLASSIC_PRISONERS,
            workers: 1,
            execution_mode: ExecutionMode::Sequential,
        }
    }
}

impl SimulationBuilder {
    /// Creates a builder populated with the classic-puzzle defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of prisoners (and boxes) per trial.
    #[must_use]
    pub fn with_prisoners(mut self, prisoners: usize) -> Self {
        self.prisoners = prisoners;
        self
    }

    /// Returns the configured prisoner count.
    #[must_use]
    pub fn prisoners(&self) -> usize {
        self.prisoners
    }

    /// Overrides the number of boxes each prisoner may open.
    #[must_use]
    pub fn with_max_opens(mut self, max_opens: usize) -> Self {
        self.max_opens = max_opens;
        self
    }

    /// Returns the configured open budget.
    #[must_use]
    pub fn max_opens(&self) -> usize {
        self.max_opens
    }

    /// Overrides the disjoint-set engine capacity.
    ///
    /// The capacity bounds the prisoner count a built simulation accepts;
    /// the default matches the classic puzzle size.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Returns the configured engine capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Overrides the number of concurrent workers.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Returns the configured worker count.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Sets the execution mode used when running the simulation.
    #[must_use]
    pub fn with_execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = mode;
        self
    }

    /// Returns the currently configured execution mode.
    #[must_use]
    pub fn execution_mode(&self) -> ExecutionMode {
        self.execution_mode
    }

    /// Validates the configuration and constructs a [`Simulation`].
    ///
    /// # Errors
    /// Returns [`WardenError::InvalidPrisonerCount`],
    /// [`WardenError::InvalidMaxOpens`], or
    /// [`WardenError::InvalidWorkerCount`] when a count is zero, and
    /// [`WardenError::CapacityExceeded`] when the prisoner count does not
    /// fit the engine capacity.
    pub fn build(self) -> Result<Simulation> {
        let prisoners = NonZeroUsize::new(self.prisoners)
            .ok_or(WardenError::InvalidPrisonerCount { got: self.prisoners })?;
        let max_opens = NonZeroUsize::new(self.max_opens)
            .ok_or(WardenError::InvalidMaxOpens { got: self.max_opens })?;
        let workers = NonZeroUsize::new(self.workers)
            .ok_or(WardenError::InvalidWorkerCount { got: self.workers })?;
        if prisoners.get() > self.capacity {
            return Err(WardenError::CapacityExceeded {
                requested: prisoners.get(),
                capacity: self.capacity,
            });
        }

        Ok(Simulation::new(
            prisoners,
            max_opens,
            self.capacity,
            workers,
            self.execution_mode,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{CLASSIC_MAX_OPENS, CLASSIC_PRISONERS, ExecutionMode, SimulationBuilder};
    use crate::error::WardenError;

    #[test]
    fn defaults_describe_the_classic_puzzle() {
        let builder = SimulationBuilder::new();
        assert_eq!(builder.prisoners(), CLASSIC_PRISONERS);
        assert_eq!(builder.max_opens(), CLASSIC_MAX_OPENS);
        assert_eq!(builder.capacity(), CLASSIC_PRISONERS);
        assert_eq!(builder.workers(), 1);
        assert_eq!(builder.execution_mode(), ExecutionMode::Sequential);
    }

    #[rstest]
    #[case(SimulationBuilder::new().with_prisoners(0), WardenError::InvalidPrisonerCount { got: 0 })]
    #[case(SimulationBuilder::new().with_max_opens(0), WardenError::InvalidMaxOpens { got: 0 })]
    #[case(SimulationBuilder::new().with_workers(0), WardenError::InvalidWorkerCount { got: 0 })]
    #[case(
        SimulationBuilder::new().with_prisoners(200),
        WardenError::CapacityExceeded { requested: 200, capacity: 100 }
    )]
    fn build_rejects_invalid_configurations(
        #[case] builder: SimulationBuilder,
        #[case] expected: WardenError,
    ) {
        let err = builder.build().expect_err("configuration is invalid");
        assert_eq!(err, expected);
    }

    #[test]
    fn capacity_can_be_raised_for_larger_puzzles() {
        let simulation = SimulationBuilder::new()
            .with_prisoners(200)
            .with_max_opens(100)
            .with_capacity(200)
            .build()
            .expect("capacity covers the prisoner count");
        assert_eq!(simulation.prisoners().get(), 200);
        assert_eq!(simulation.capacity(), 200);
    }
}
