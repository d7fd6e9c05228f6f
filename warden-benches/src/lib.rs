//! Shared helpers for warden benchmarks.

use rand::SeedableRng;
use warden_core::TrialRng;

/// Fixed-seed generator so benchmark timings are comparable across runs.
#[must_use]
pub fn seeded_rng(seed: u64) -> TrialRng {
    TrialRng::seed_from_u64(seed)
}
