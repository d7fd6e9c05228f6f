//! Entropy seeding for worker-owned trial generators.
//!
//! Generator state is an explicit object owned by each worker, never a
//! process-wide global: independence across workers is a property of
//! construction. Every worker seeds its own [`TrialRng`] from the
//! operating system's entropy source at startup; a run that cannot obtain
//! seed material aborts rather than fall back to a predictable seed.

use std::sync::Arc;

use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng};

use crate::error::{Result, WardenError};

/// Generator backing every trial draw.
///
/// The trial engine is generic over [`rand::Rng`], so the concrete
/// algorithm behind the "uniform integer in `[0, k]`" capability stays
/// interchangeable; `SmallRng` is the default for raw throughput.
pub type TrialRng = SmallRng;

/// Seeds a fresh [`TrialRng`] from the operating system's entropy source.
///
/// # Errors
/// Returns [`WardenError::EntropyUnavailable`] when the entropy source
/// cannot be read.
pub fn from_entropy() -> Result<TrialRng> {
    let mut seed = <TrialRng as SeedableRng>::Seed::default();
    OsRng
        .try_fill_bytes(seed.as_mut())
        .map_err(|err| WardenError::EntropyUnavailable {
            message: Arc::from(err.to_string()),
        })?;
    Ok(TrialRng::from_seed(seed))
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::{TrialRng, from_entropy};

    #[test]
    fn seeding_from_entropy_succeeds() {
        assert!(from_entropy().is_ok());
    }

    #[test]
    fn uniform_draws_stay_in_bounds_and_cover_the_range() {
        let mut rng = TrialRng::seed_from_u64(0x5EED);
        let mut seen = [false; 4];
        for _ in 0..10_000 {
            let draw = rng.gen_range(0..=3usize);
            seen[draw] = true;
        }
        assert!(seen.iter().all(|&hit| hit), "some value in [0, 3] never drawn");
    }

    #[test]
    fn uniform_draws_pass_a_loose_chi_square_check() {
        const BUCKETS: usize = 10;
        const DRAWS: usize = 100_000;

        let mut rng = TrialRng::seed_from_u64(0xD1CE);
        let mut counts = [0u64; BUCKETS];
        for _ in 0..DRAWS {
            let draw = rng.gen_range(0..=BUCKETS - 1);
            counts[draw] += 1;
        }

        let expected = DRAWS as f64 / BUCKETS as f64;
        let chi_square: f64 = counts
            .iter()
            .map(|&observed| {
                let gap = observed as f64 - expected;
                gap * gap / expected
            })
            .sum();
        // 99.9th percentile of chi-square with 9 degrees of freedom
        assert!(
            chi_square < 27.88,
            "chi-square statistic {chi_square} suggests non-uniform draws"
        );
    }
}
