//! Trial engine: decides whether a random permutation's cycles all fit
//! within the box-open budget, without materialising the permutation.
//!
//! A prisoner following the cycle strategy opens exactly as many boxes as
//! the length of the permutation cycle containing their own number, so a
//! trial succeeds precisely when no cycle is longer than the budget. The
//! permutation is built as a sequence of Fisher-Yates transpositions
//! ("link element `i` to a uniform element of `[0, i]`"), and each link is
//! mirrored as a union in a [`DisjointSet`]. Component sizes then track
//! cycle lengths incrementally, in `O(n * alpha(n))` per trial instead of
//! the `O(n * budget)` of walking every prisoner's chain, and a trial can
//! abort the moment a component outgrows the budget.
//!
//! [`run_naive_trial`] keeps the explicit permutation-walk formulation
//! alive as a differential-testing reference and benchmark baseline.

use rand::Rng;

use crate::disjoint_set::DisjointSet;
use crate::error::Result;

/// Reusable engine running one trial at a time over an owned
/// [`DisjointSet`].
///
/// Bounds are validated once at construction so the per-trial loop is
/// infallible.
#[derive(Clone, Debug)]
pub struct TrialEngine {
    set: DisjointSet,
    prisoners: usize,
    max_opens: usize,
}

impl TrialEngine {
    /// Creates an engine for `prisoners` elements and a `max_opens` cycle
    /// budget, backed by a set of the given capacity.
    ///
    /// # Errors
    /// Returns [`crate::WardenError::CapacityExceeded`] when `prisoners`
    /// exceeds `capacity`.
    pub fn new(prisoners: usize, max_opens: usize, capacity: usize) -> Result<Self> {
        let mut set = DisjointSet::with_capacity(capacity);
        set.init(prisoners)?;
        Ok(Self {
            set,
            prisoners,
            max_opens,
        })
    }

    /// Returns the number of prisoners simulated per trial.
    #[must_use]
    pub fn prisoners(&self) -> usize {
        self.prisoners
    }

    /// Returns the box-open budget per prisoner.
    #[must_use]
    pub fn max_opens(&self) -> usize {
        self.max_opens
    }

    /// Runs one trial, returning `true` when every cycle fits the budget.
    ///
    /// Short-circuits on the first merged component whose size exceeds the
    /// budget; the remaining links are never formed.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.set.reset(self.prisoners);
        for i in (1..self.prisoners).rev() {
            let j = rng.gen_range(0..=i);
            self.set.union(i, j);
            let root = self.set.find(i);
            if self.set.size_of(root) > self.max_opens {
                return false;
            }
        }
        true
    }

    #[cfg(test)]
    fn set(&mut self) -> &mut DisjointSet {
        &mut self.set
    }
}

/// Reference formulation: build the permutation array explicitly, then walk
/// every prisoner's chain for at most `max_opens` opens.
///
/// Consumes an identical draw sequence to [`TrialEngine::run`], so for any
/// fixed seed and any `max_opens >= 1` the two verdicts agree.
#[must_use]
pub fn run_naive_trial<R: Rng + ?Sized>(prisoners: usize, max_opens: usize, rng: &mut R) -> bool {
    let mut boxes: Vec<usize> = (0..prisoners).collect();
    for i in (1..prisoners).rev() {
        let j = rng.gen_range(0..=i);
        boxes.swap(i, j);
    }
    (0..prisoners).all(|prisoner| finds_own_tag(prisoner, &boxes, max_opens))
}

fn finds_own_tag(prisoner: usize, boxes: &[usize], max_opens: usize) -> bool {
    let mut current = prisoner;
    for _ in 0..max_opens {
        if boxes[current] == prisoner {
            return true;
        }
        current = boxes[current];
    }
    false
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand::rngs::mock::StepRng;
    use rstest::rstest;

    use super::{TrialEngine, run_naive_trial};

    #[test]
    fn single_prisoner_always_succeeds() {
        let mut engine = TrialEngine::new(1, 1, 1).expect("configuration is valid");
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(engine.run(&mut rng));
    }

    #[rstest]
    #[case(10, 10)]
    #[case(10, 50)]
    fn budget_of_n_or_more_always_succeeds(#[case] prisoners: usize, #[case] max_opens: usize) {
        let mut engine =
            TrialEngine::new(prisoners, max_opens, prisoners).expect("configuration is valid");
        for seed in 0..32u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            assert!(engine.run(&mut rng), "seed {seed} should succeed");
        }
    }

    #[test]
    fn all_zero_draws_build_one_growing_cycle() {
        // StepRng yields only zeros, so every element links to 0 and the
        // trial fails once the single component outgrows the budget
        let mut engine = TrialEngine::new(10, 5, 10).expect("configuration is valid");
        let mut rng = StepRng::new(0, 0);
        assert!(!engine.run(&mut rng));
    }

    #[test]
    fn failing_trial_short_circuits() {
        let max_opens = 50;
        let mut engine = TrialEngine::new(100, max_opens, 100).expect("configuration is valid");
        let mut rng = StepRng::new(0, 0);
        assert!(!engine.run(&mut rng));

        // the run stopped at the first oversized component: exactly
        // max_opens + 1 members were linked, the rest stayed singletons
        let set = engine.set();
        let root = set.find(0);
        assert_eq!(set.size_of(root), max_opens + 1);
        assert_eq!(set.find(1), 1);
    }

    #[test]
    fn engine_resets_between_trials() {
        let mut reused = TrialEngine::new(10, 5, 10).expect("configuration is valid");
        assert!(!reused.run(&mut StepRng::new(0, 0)));
        // after a failed run the engine must behave like a fresh one
        let mut fresh = TrialEngine::new(10, 5, 10).expect("configuration is valid");
        for seed in 0..16u64 {
            assert_eq!(
                reused.run(&mut SmallRng::seed_from_u64(seed)),
                fresh.run(&mut SmallRng::seed_from_u64(seed)),
                "seed {seed} diverged after reuse"
            );
        }
    }

    #[test]
    fn two_prisoners_swapped_need_two_opens() {
        // zero draws swap the pair into the 2-cycle (1 0)
        let mut one_open = TrialEngine::new(2, 1, 2).expect("configuration is valid");
        assert!(!one_open.run(&mut StepRng::new(0, 0)));
        assert!(!run_naive_trial(2, 1, &mut StepRng::new(0, 0)));

        let mut two_opens = TrialEngine::new(2, 2, 2).expect("configuration is valid");
        assert!(two_opens.run(&mut StepRng::new(0, 0)));
        assert!(run_naive_trial(2, 2, &mut StepRng::new(0, 0)));
    }

    proptest! {
        #[test]
        fn union_find_verdict_matches_naive_walk(
            seed in any::<u64>(),
            prisoners in 1usize..=80,
            budget in 1usize..=80,
        ) {
            let max_opens = 1 + (budget - 1) % prisoners;
            let mut engine = TrialEngine::new(prisoners, max_opens, prisoners)
                .expect("configuration is valid");
            let mut union_find_rng = SmallRng::seed_from_u64(seed);
            let mut naive_rng = SmallRng::seed_from_u64(seed);
            prop_assert_eq!(
                engine.run(&mut union_find_rng),
                run_naive_trial(prisoners, max_opens, &mut naive_rng),
            );
        }
    }
}
