//! Error types for the warden core library.
//!
//! Defines the error enum exposed by the public API, a stable
//! machine-readable code for each variant, and a convenient result alias.

use std::sync::Arc;

use thiserror::Error;

/// An error produced while configuring or running a simulation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum WardenError {
    /// At least one prisoner is required.
    #[error("prisoner count must be at least 1 (got {got})")]
    InvalidPrisonerCount {
        /// The invalid prisoner count supplied by the caller.
        got: usize,
    },
    /// Each prisoner must be allowed to open at least one box.
    #[error("max_opens must be at least 1 (got {got})")]
    InvalidMaxOpens {
        /// The invalid open budget supplied by the caller.
        got: usize,
    },
    /// At least one worker is required.
    #[error("worker count must be at least 1 (got {got})")]
    InvalidWorkerCount {
        /// The invalid worker count supplied by the caller.
        got: usize,
    },
    /// The requested set size exceeds the disjoint-set engine's capacity.
    #[error("requested set size {requested} exceeds engine capacity {capacity}")]
    CapacityExceeded {
        /// Number of elements the caller asked for.
        requested: usize,
        /// Capacity the engine was allocated with.
        capacity: usize,
    },
    /// The operating system's entropy source could not be read.
    ///
    /// Fatal to the whole run: no trial may proceed without an
    /// independently seeded generator.
    #[error("entropy source unavailable: {message}")]
    EntropyUnavailable {
        /// Description of the underlying entropy failure.
        message: Arc<str>,
    },
    /// The operating system refused to create a worker thread.
    ///
    /// Fatal to the run; silently dropping a worker would bias the
    /// effective trial count.
    #[error("failed to spawn worker {worker}: {message}")]
    WorkerSpawn {
        /// Index of the worker that could not be spawned.
        worker: usize,
        /// Description of the underlying spawn failure.
        message: Arc<str>,
    },
    /// A worker panicked before producing its success count.
    #[error("worker {worker} panicked before completing its trials")]
    WorkerPanicked {
        /// Index of the worker that panicked.
        worker: usize,
    },
}

impl WardenError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> WardenErrorCode {
        match self {
            Self::InvalidPrisonerCount { .. } => WardenErrorCode::InvalidPrisonerCount,
            Self::InvalidMaxOpens { .. } => WardenErrorCode::InvalidMaxOpens,
            Self::InvalidWorkerCount { .. } => WardenErrorCode::InvalidWorkerCount,
            Self::CapacityExceeded { .. } => WardenErrorCode::CapacityExceeded,
            Self::EntropyUnavailable { .. } => WardenErrorCode::EntropyUnavailable,
            Self::WorkerSpawn { .. } => WardenErrorCode::WorkerSpawn,
            Self::WorkerPanicked { .. } => WardenErrorCode::WorkerPanicked,
        }
    }
}

/// Machine-readable error codes for [`WardenError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WardenErrorCode {
    /// At least one prisoner is required.
    InvalidPrisonerCount,
    /// Each prisoner must be allowed to open at least one box.
    InvalidMaxOpens,
    /// At least one worker is required.
    InvalidWorkerCount,
    /// The requested set size exceeds the engine's capacity.
    CapacityExceeded,
    /// The operating system's entropy source could not be read.
    EntropyUnavailable,
    /// The operating system refused to create a worker thread.
    WorkerSpawn,
    /// A worker panicked before producing its success count.
    WorkerPanicked,
}

impl WardenErrorCode {
    /// Returns the symbolic identifier for logging and scripting surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPrisonerCount => "INVALID_PRISONER_COUNT",
            Self::InvalidMaxOpens => "INVALID_MAX_OPENS",
            Self::InvalidWorkerCount => "INVALID_WORKER_COUNT",
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::EntropyUnavailable => "ENTROPY_UNAVAILABLE",
            Self::WorkerSpawn => "WORKER_SPAWN",
            Self::WorkerPanicked => "WORKER_PANICKED",
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, WardenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_identifiers() {
        let err = WardenError::CapacityExceeded {
            requested: 101,
            capacity: 100,
        };
        assert_eq!(err.code(), WardenErrorCode::CapacityExceeded);
        assert_eq!(err.code().as_str(), "CAPACITY_EXCEEDED");
    }

    #[test]
    fn messages_carry_structured_fields() {
        let err = WardenError::WorkerSpawn {
            worker: 3,
            message: Arc::from("no threads left"),
        };
        assert_eq!(
            err.to_string(),
            "failed to spawn worker 3: no threads left"
        );
    }
}
