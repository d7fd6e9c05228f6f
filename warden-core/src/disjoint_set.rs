//! Disjoint-set (union-find) engine backing the trial kernel.
//!
//! The trial engine interprets a permutation's cycles as connected
//! components and merges them incrementally. This module provides the
//! union-find structure that tracks component membership and size.
//!
//! `find` applies *path halving*: each visited element is repointed at its
//! grandparent rather than directly at the root. The chain still shortens
//! geometrically across calls without a second pass over the path.

use crate::error::{Result, WardenError};

/// Partition of `n` labelled elements into disjoint sets, with
/// union-by-size merging and size queries on representatives.
///
/// Storage is allocated once for a caller-supplied capacity;
/// [`DisjointSet::init`] re-arms the structure for a new trial without
/// reallocating.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    n: usize,
}

impl DisjointSet {
    /// Allocates an engine able to hold up to `capacity` elements, all
    /// initially singletons.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            parent: (0..capacity).collect(),
            size: vec![1; capacity],
            n: capacity,
        }
    }

    /// Returns the maximum element count this engine can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.parent.len()
    }

    /// Returns the number of active elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` when no elements are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Resets the first `n` elements to singleton sets.
    ///
    /// # Errors
    /// Returns [`WardenError::CapacityExceeded`] when `n` is larger than
    /// the capacity the engine was allocated with.
    pub fn init(&mut self, n: usize) -> Result<()> {
        if n > self.capacity() {
            return Err(WardenError::CapacityExceeded {
                requested: n,
                capacity: self.capacity(),
            });
        }
        self.reset(n);
        Ok(())
    }

    /// Infallible reset for callers that validated `n` against the
    /// capacity up front.
    pub(crate) fn reset(&mut self, n: usize) {
        for (i, parent) in self.parent.iter_mut().enumerate().take(n) {
            *parent = i;
        }
        for size in self.size.iter_mut().take(n) {
            *size = 1;
        }
        self.n = n;
    }

    /// Returns the representative root of `x`'s set.
    ///
    /// Applies path halving on the way up: every visited element's parent
    /// pointer is repointed at its grandparent. Chains shrink on each call
    /// without being fully flattened in one pass.
    pub fn find(&mut self, x: usize) -> usize {
        let mut current = x;
        while self.parent[current] != current {
            self.parent[current] = self.parent[self.parent[current]];
            current = self.parent[current];
        }
        current
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// A no-op when both share a root. Otherwise the smaller set's root is
    /// attached under the larger set's root (ties keep `a`'s root), and the
    /// surviving root's size becomes the sum. Callers query the merged size
    /// via [`DisjointSet::find`] and [`DisjointSet::size_of`].
    pub fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        if self.size[root_a] >= self.size[root_b] {
            self.size[root_a] += self.size[root_b];
            self.parent[root_b] = root_a;
        } else {
            self.size[root_b] += self.size[root_a];
            self.parent[root_a] = root_b;
        }
    }

    /// Returns the size recorded for `root`.
    ///
    /// Only meaningful when `root` is a representative returned by
    /// [`DisjointSet::find`]; non-root entries hold stale values.
    #[must_use]
    pub fn size_of(&self, root: usize) -> usize {
        self.size[root]
    }

    #[cfg(test)]
    fn from_parts(parent: Vec<usize>, size: Vec<usize>) -> Self {
        let n = parent.len();
        Self { parent, size, n }
    }

    #[cfg(test)]
    fn parent_of(&self, x: usize) -> usize {
        self.parent[x]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rstest::rstest;

    use super::DisjointSet;
    use crate::error::WardenError;

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(100)]
    fn init_resets_to_singletons(#[case] n: usize) {
        let mut set = DisjointSet::with_capacity(100);
        set.init(n).expect("n fits the capacity");
        assert_eq!(set.len(), n);
        for i in 0..n {
            assert_eq!(set.find(i), i);
            assert_eq!(set.size_of(i), 1);
        }
    }

    #[test]
    fn init_rejects_sizes_beyond_capacity() {
        let mut set = DisjointSet::with_capacity(100);
        let err = set.init(101).expect_err("101 exceeds capacity 100");
        assert_eq!(
            err,
            WardenError::CapacityExceeded {
                requested: 101,
                capacity: 100,
            }
        );
    }

    #[test]
    fn init_clears_state_from_a_previous_trial() {
        let mut set = DisjointSet::with_capacity(8);
        set.init(8).expect("8 fits");
        set.union(0, 1);
        set.union(1, 2);
        set.init(8).expect("8 fits");
        assert_eq!(set.find(2), 2);
        let root0 = set.find(0);
        assert_eq!(set.size_of(root0), 1);
    }

    #[test]
    fn union_is_a_noop_for_same_set() {
        let mut set = DisjointSet::with_capacity(4);
        set.init(4).expect("4 fits");
        set.union(0, 1);
        let root = set.find(0);
        set.union(1, 0);
        assert_eq!(set.find(1), root);
        assert_eq!(set.size_of(root), 2);
    }

    #[test]
    fn union_attaches_smaller_tree_under_larger() {
        let mut set = DisjointSet::with_capacity(8);
        set.init(8).expect("8 fits");
        set.union(0, 1);
        set.union(0, 2);
        let big = set.find(0);
        set.union(3, 0);
        // the singleton 3 joins the size-3 component, whose root survives
        assert_eq!(set.find(3), big);
        assert_eq!(set.size_of(big), 4);
    }

    #[test]
    fn find_halves_the_visited_path() {
        // chain 4 -> 3 -> 2 -> 1 -> 0
        let parent = vec![0, 0, 1, 2, 3];
        let size = vec![5, 1, 1, 1, 1];
        let mut set = DisjointSet::from_parts(parent, size);

        assert_eq!(set.find(4), 0);
        // each visited element now points at what was its grandparent
        assert_eq!(set.parent_of(4), 2);
        assert_eq!(set.parent_of(2), 0);
        // the skipped element keeps its old parent
        assert_eq!(set.parent_of(3), 2);
    }

    proptest! {
        #[test]
        fn root_count_tracks_effective_merges(
            n in 2usize..64,
            pairs in prop::collection::vec((0usize..64, 0usize..64), 0..128),
        ) {
            let mut set = DisjointSet::with_capacity(n);
            set.init(n).expect("n equals capacity");
            let mut merges = 0usize;
            for (a, b) in pairs {
                let (a, b) = (a % n, b % n);
                if set.find(a) != set.find(b) {
                    merges += 1;
                }
                set.union(a, b);
            }
            let roots: HashSet<usize> = (0..n).map(|i| set.find(i)).collect();
            prop_assert_eq!(roots.len(), n - merges);
        }

        #[test]
        fn component_sizes_sum_to_n(
            n in 1usize..64,
            pairs in prop::collection::vec((0usize..64, 0usize..64), 0..64),
        ) {
            let mut set = DisjointSet::with_capacity(n);
            set.init(n).expect("n equals capacity");
            for (a, b) in pairs {
                set.union(a % n, b % n);
            }
            let roots: HashSet<usize> = (0..n).map(|i| set.find(i)).collect();
            let total: usize = roots.iter().map(|&r| set.size_of(r)).sum();
            prop_assert_eq!(total, n);
        }
    }
}
