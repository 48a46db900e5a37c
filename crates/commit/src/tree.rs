//! Bottom-up binary reduction tree over evaluation values.
//!
//! Levels are stored leaves first:
//! - `levels[0]`: the evaluation table (`N` values)
//! - `levels[j + 1][i] = combine(levels[j][2i], levels[j][2i + 1])`
//! - `levels[k]`: a single value, the root
//!
//! `N` must be a power of two so that every level halves exactly. The tree is
//! Merkle-shaped but only as strong as its [`Combine`] strategy.

use crate::combine::Combine;
use crate::commitment::CommitError;
use crate::proof::{PointValueProof, Triplet};

/// Reduction tree with every level kept for proof generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReductionTree {
    levels: Vec<Vec<u64>>,
}

impl ReductionTree {
    /// Build the tree from leaf values.
    ///
    /// Fails with [`CommitError::MalformedDomain`] if `leaves` is empty or
    /// its length is not a power of two.
    pub fn build<C: Combine>(leaves: Vec<u64>, combiner: &C) -> Result<Self, CommitError> {
        if !leaves.len().is_power_of_two() {
            return Err(CommitError::MalformedDomain(leaves.len()));
        }

        let mut levels = vec![leaves];
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let parents: Vec<u64> = current
                .chunks_exact(2)
                .map(|pair| combiner.combine(pair[0], pair[1]))
                .collect();
            levels.push(parents);
        }

        Ok(Self { levels })
    }

    /// The single value at the top level.
    pub fn root(&self) -> u64 {
        // `build` guarantees at least one level ending in exactly one node
        self.levels[self.levels.len() - 1][0]
    }

    pub fn leaves(&self) -> &[u64] {
        &self.levels[0]
    }

    pub fn num_leaves(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels above the leaves (`log2(num_leaves)`).
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn level(&self, index: usize) -> Option<&[u64]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    pub fn levels(&self) -> &[Vec<u64>] {
        &self.levels
    }

    /// Authentication path for leaf `index`.
    ///
    /// For each level `i` in `1..=depth`, the ancestor of `index` sits at
    /// `index >> i`; its children sit at `2a` and `2a + 1` one level down.
    pub fn authentication_path(&self, index: usize) -> Result<PointValueProof, CommitError> {
        if index >= self.num_leaves() {
            return Err(CommitError::OutOfDomain {
                point: index as u64,
                num_points: self.num_leaves(),
            });
        }

        let triplets = (1..self.levels.len())
            .map(|i| {
                let ancestor = index >> i;
                let below = &self.levels[i - 1];
                Triplet::new(
                    self.levels[i][ancestor],
                    below[2 * ancestor],
                    below[2 * ancestor + 1],
                )
            })
            .collect();

        Ok(PointValueProof::new(triplets))
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::AdditiveCombine;

    fn additive() -> AdditiveCombine {
        AdditiveCombine::new(100).unwrap()
    }

    #[test]
    fn test_build_tree() {
        let tree = ReductionTree::build(vec![10, 20, 30, 40], &additive()).unwrap();

        assert_eq!(tree.num_leaves(), 4);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.level(1), Some(&[30u64, 70][..]));
        assert_eq!(tree.root(), 0); // 100 mod 100
        assert_eq!(tree.leaves(), &[10, 20, 30, 40]);
        assert_eq!(tree.level(3), None);
    }

    #[test]
    fn test_level_sizes_halve() {
        let leaves: Vec<u64> = (0..32).collect();
        let tree = ReductionTree::build(leaves, &additive()).unwrap();

        assert_eq!(tree.depth(), 5);
        for (j, level) in tree.levels().iter().enumerate() {
            assert_eq!(level.len(), 32 >> j);
        }
    }

    #[test]
    fn test_build_tree_non_power_of_two() {
        assert_eq!(
            ReductionTree::build(vec![1, 2, 3], &additive()),
            Err(CommitError::MalformedDomain(3))
        );
        assert_eq!(
            ReductionTree::build(vec![1; 6], &additive()),
            Err(CommitError::MalformedDomain(6))
        );
    }

    #[test]
    fn test_build_tree_empty() {
        assert_eq!(
            ReductionTree::build(Vec::new(), &additive()),
            Err(CommitError::MalformedDomain(0))
        );
    }

    #[test]
    fn test_single_leaf_tree() {
        let tree = ReductionTree::build(vec![42], &additive()).unwrap();

        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.root(), 42);
        assert!(tree.authentication_path(0).unwrap().is_empty());
    }

    #[test]
    fn test_authentication_path() {
        // levels: [1..8] -> [3, 7, 11, 15] -> [10, 26] -> [36]
        let tree = ReductionTree::build((1..=8).collect(), &additive()).unwrap();
        let proof = tree.authentication_path(5).unwrap();

        assert_eq!(
            proof.triplets,
            vec![
                Triplet::new(11, 5, 6),
                Triplet::new(26, 11, 15),
                Triplet::new(36, 10, 26),
            ]
        );
        assert_eq!(proof.claimed_root(), Some(tree.root()));
    }

    #[test]
    fn test_authentication_path_out_of_bounds() {
        let tree = ReductionTree::build(vec![1, 2], &additive()).unwrap();
        assert_eq!(
            tree.authentication_path(2),
            Err(CommitError::OutOfDomain {
                point: 2,
                num_points: 2
            })
        );
    }
}
