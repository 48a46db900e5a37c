//! Point-value proofs (authentication paths through the reduction tree).

use serde::{Deserialize, Serialize};

/// One step of an authentication path: a node and the two children it was
/// combined from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triplet {
    pub parent: u64,
    pub left: u64,
    pub right: u64,
}

impl Triplet {
    pub fn new(parent: u64, left: u64, right: u64) -> Self {
        Self {
            parent,
            left,
            right,
        }
    }

    /// Child on side `bit` (0 = left, 1 = right).
    pub fn child(&self, bit: usize) -> u64 {
        if bit & 1 == 0 {
            self.left
        } else {
            self.right
        }
    }
}

/// Authentication path from a leaf up to the root.
///
/// `triplets[0]` holds the two leaves sharing a parent with the proven point;
/// the last triplet's `parent` is the root. A domain of `2^k` points yields
/// `k` triplets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointValueProof {
    pub triplets: Vec<Triplet>,
}

impl PointValueProof {
    pub fn new(triplets: Vec<Triplet>) -> Self {
        Self { triplets }
    }

    /// Number of tree levels covered by the proof.
    pub fn len(&self) -> usize {
        self.triplets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triplets.is_empty()
    }

    /// Size of the evaluation domain this proof was cut from, or `None` if
    /// the path is too long to describe a `usize` domain.
    pub fn domain_size(&self) -> Option<usize> {
        u32::try_from(self.triplets.len())
            .ok()
            .and_then(|k| 1usize.checked_shl(k))
    }

    /// Value the proof commits to at the top of the path.
    pub fn claimed_root(&self) -> Option<u64> {
        self.triplets.last().map(|t| t.parent)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triplet> {
        self.triplets.iter()
    }
}

impl<'a> IntoIterator for &'a PointValueProof {
    type Item = &'a Triplet;
    type IntoIter = std::slice::Iter<'a, Triplet>;

    fn into_iter(self) -> Self::IntoIter {
        self.triplets.iter()
    }
}
