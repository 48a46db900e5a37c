//! Point-value proof verification.
//!
//! Verification is stateless: it sees only the claimed `(point, value)` pair,
//! the proof, and the combine function. Checks, in order:
//!
//! 1. **Domain**: a proof of `k` triplets describes a domain of `2^k` points,
//!    and the value and every proof entry lie below the combiner's bound.
//! 2. **Leaf**: the first triplet's child on side `point mod 2` is `value`.
//! 3. **Combine**: every triplet satisfies `combine(left, right) == parent`.
//! 4. **Chain** ([`ChainCheck::Strict`] only): each triplet's parent is the
//!    child of the next triplet on the side selected by the next bit of
//!    `point`, so the triplets form a single path to the top.
//!
//! Earlier revisions of this verifier omitted step 4. Without it a proof can
//! be assembled from internally consistent but unrelated triplets;
//! [`ChainCheck::Skip`] keeps that behavior available for comparison.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combine::{AdditiveCombine, Combine};
use crate::params::{CommitmentParams, ParamError};
use crate::proof::PointValueProof;

/// Reasons a proof is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("proof contains no triplets")]
    EmptyProof,

    #[error("point {point} is outside the proof's domain of {domain} points")]
    OutOfDomain { point: u64, domain: u64 },

    #[error("value {value} is not canonical (bound {bound})")]
    NonCanonical { value: u64, bound: u64 },

    #[error("leaf mismatch: claimed {expected}, proof holds {found}")]
    LeafMismatch { expected: u64, found: u64 },

    #[error("combine check failed at level {level}")]
    CombineMismatch { level: usize },

    #[error("triplet at level {level} does not link to the level above")]
    BrokenChain { level: usize },

    #[error("root mismatch: committed {expected}, proof reaches {found}")]
    RootMismatch { expected: u64, found: u64 },
}

/// How strictly consecutive triplets must link together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainCheck {
    /// Each parent must reappear as the correct child one level up.
    #[default]
    Strict,

    /// Only the leaf and per-triplet combine checks run.
    Skip,
}

/// Stateless verifier for point-value proofs.
#[derive(Debug, Clone)]
pub struct Verifier<C = AdditiveCombine> {
    combiner: C,
    chain_check: ChainCheck,
}

impl Verifier<AdditiveCombine> {
    /// Strict verifier over the additive combine function.
    pub fn additive(combine_modulus: u64) -> Result<Self, ParamError> {
        Ok(Self::new(AdditiveCombine::new(combine_modulus)?))
    }

    /// Verifier matching validated [`CommitmentParams`].
    pub fn from_params(params: &CommitmentParams) -> Result<Self, ParamError> {
        params.validate()?;
        Ok(Self::additive(params.combine_modulus)?.with_chain_check(params.chain_check))
    }
}

impl<C: Combine> Verifier<C> {
    pub fn new(combiner: C) -> Self {
        Self {
            combiner,
            chain_check: ChainCheck::Strict,
        }
    }

    pub fn with_chain_check(mut self, chain_check: ChainCheck) -> Self {
        self.chain_check = chain_check;
        self
    }

    pub fn chain_check(&self) -> ChainCheck {
        self.chain_check
    }

    /// `true` iff [`check`](Self::check) accepts the proof.
    pub fn verify(&self, point: u64, value: u64, proof: &PointValueProof) -> bool {
        match self.check(point, value, proof) {
            Ok(()) => true,
            Err(err) => {
                debug!(point, value, %err, "point-value proof rejected");
                false
            }
        }
    }

    /// Check that `value` at `point` is consistent with `proof`.
    pub fn check(&self, point: u64, value: u64, proof: &PointValueProof) -> Result<(), VerifyError> {
        let first = proof.triplets.first().ok_or(VerifyError::EmptyProof)?;
        check_domain(point, proof)?;
        self.check_canonical(value, proof)?;

        // Leaf check
        let found = first.child(bit(point, 0));
        if found != value {
            return Err(VerifyError::LeafMismatch {
                expected: value,
                found,
            });
        }

        // Combine check
        for (level, triplet) in proof.iter().enumerate() {
            if self.combiner.combine(triplet.left, triplet.right) != triplet.parent {
                return Err(VerifyError::CombineMismatch { level });
            }
        }

        // Chain check
        if self.chain_check == ChainCheck::Strict {
            for (level, pair) in proof.triplets.windows(2).enumerate() {
                if pair[0].parent != pair[1].child(bit(point, level + 1)) {
                    return Err(VerifyError::BrokenChain { level: level + 1 });
                }
            }
        }

        Ok(())
    }

    /// [`check`](Self::check), then bind the top of the path to `root`.
    ///
    /// An empty proof describes a single-point domain and is accepted when
    /// `point == 0` and `value == root`.
    pub fn check_against_root(
        &self,
        root: u64,
        point: u64,
        value: u64,
        proof: &PointValueProof,
    ) -> Result<(), VerifyError> {
        let Some(top) = proof.claimed_root() else {
            self.check_canonical(value, proof)?;
            if point != 0 {
                return Err(VerifyError::OutOfDomain { point, domain: 1 });
            }
            if value != root {
                return Err(VerifyError::RootMismatch {
                    expected: root,
                    found: value,
                });
            }
            return Ok(());
        };

        self.check(point, value, proof)?;
        if top != root {
            return Err(VerifyError::RootMismatch {
                expected: root,
                found: top,
            });
        }
        Ok(())
    }

    fn check_canonical(&self, value: u64, proof: &PointValueProof) -> Result<(), VerifyError> {
        let Some(bound) = self.combiner.bound() else {
            return Ok(());
        };
        let entries = proof.iter().flat_map(|t| [t.parent, t.left, t.right]);
        match std::iter::once(value).chain(entries).find(|&v| v >= bound) {
            Some(value) => Err(VerifyError::NonCanonical { value, bound }),
            None => Ok(()),
        }
    }

    /// `true` iff [`check_against_root`](Self::check_against_root) accepts.
    pub fn verify_against_root(
        &self,
        root: u64,
        point: u64,
        value: u64,
        proof: &PointValueProof,
    ) -> bool {
        match self.check_against_root(root, point, value, proof) {
            Ok(()) => true,
            Err(err) => {
                debug!(root, point, value, %err, "root-bound proof rejected");
                false
            }
        }
    }
}

/// Bit `i` of `point`, zero past the top of the word.
fn bit(point: u64, i: usize) -> usize {
    u32::try_from(i)
        .ok()
        .and_then(|i| point.checked_shr(i))
        .map_or(0, |shifted| (shifted & 1) as usize)
}

fn check_domain(point: u64, proof: &PointValueProof) -> Result<(), VerifyError> {
    let k = proof.len();
    // Any u64 point fits a domain of 2^64 or more
    if k < 64 && point >> k != 0 {
        return Err(VerifyError::OutOfDomain {
            point,
            domain: 1u64 << k,
        });
    }
    Ok(())
}

/// Verify a point-value proof with the additive combine function and strict
/// chain checking.
///
/// # Example
///
/// ```
/// use fri_commit::{verify_point_value, EvaluationCommitment, Polynomial};
///
/// let poly = Polynomial::new(&[1, 4, 6, 4, 1], 100).unwrap();
/// let commitment = EvaluationCommitment::new(&poly, 8, 100).unwrap();
/// let proof = commitment.prove_point_value(2).unwrap();
///
/// assert!(verify_point_value(2, poly.evaluate(2), &proof, 100));
/// assert!(!verify_point_value(2, poly.evaluate(2) + 1, &proof, 100));
/// ```
pub fn verify_point_value(
    point: u64,
    value: u64,
    proof: &PointValueProof,
    combine_modulus: u64,
) -> bool {
    match Verifier::additive(combine_modulus) {
        Ok(verifier) => verifier.verify(point, value, proof),
        Err(err) => {
            debug!(combine_modulus, %err, "cannot verify with this combine modulus");
            false
        }
    }
}

// ========== Tests ==========
