//! Warden core library.
//!
//! Monte Carlo estimation of the classic 100 prisoners problem: a
//! union-find kernel decides each trial's verdict incrementally, an
//! estimator turns success counts into a mean, variance, and confidence
//! interval, and a parallel harness partitions trials across
//! independently seeded workers.

mod builder;
mod disjoint_set;
mod error;
mod estimator;
mod harness;
pub mod rng;
mod simulation;
mod trial;

pub use crate::{
    builder::{CLASSIC_MAX_OPENS, CLASSIC_PRISONERS, ExecutionMode, SimulationBuilder},
    disjoint_set::DisjointSet,
    error::{Result, WardenError, WardenErrorCode},
    estimator::{ConfidenceInterval, EstimatorResult, estimate},
    rng::TrialRng,
    simulation::Simulation,
    trial::{TrialEngine, run_naive_trial},
};
