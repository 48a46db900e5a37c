//! Evaluation commitments.
//!
//! ## Protocol
//!
//! 1. **Commit**: evaluate the polynomial at `0..num_points` and reduce the
//!    table with a [`ReductionTree`]; the root is the public commitment.
//! 2. **Prove**: for a point `x`, hand out the authentication path from the
//!    leaf pair containing `P(x)` up to the root.
//! 3. **Verify**: see [`crate::verify`]; the verifier never needs this type.
//!
//! The combine function and its modulus are explicit inputs. The polynomial's
//! field modulus must match the combine modulus.

use tracing::debug;

use crate::combine::{AdditiveCombine, Combine};
use crate::params::{CommitmentParams, ParamError};
use crate::polynomial::Polynomial;
use crate::proof::PointValueProof;
use crate::tree::ReductionTree;

/// Errors raised while committing or proving.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("field mismatch: polynomial over Z_{polynomial}, combine modulus {combine}")]
    FieldMismatch { polynomial: u64, combine: u64 },

    #[error("malformed domain: {0} points is not a positive power of 2")]
    MalformedDomain(usize),

    #[error("point {point} is outside the evaluation domain 0..{num_points}")]
    OutOfDomain { point: u64, num_points: usize },

    #[error(transparent)]
    Params(#[from] ParamError),
}

/// Commitment to a polynomial's evaluations over `0..num_points`.
///
/// Owns its reduction tree exclusively and is immutable after construction.
#[derive(Clone, Debug)]
pub struct EvaluationCommitment<C = AdditiveCombine> {
    polynomial: Polynomial,
    combine_modulus: u64,
    combiner: C,
    tree: ReductionTree,
}

impl EvaluationCommitment<AdditiveCombine> {
    /// Commit using the additive combine function modulo `combine_modulus`.
    pub fn new(
        polynomial: &Polynomial,
        num_points: usize,
        combine_modulus: u64,
    ) -> Result<Self, CommitError> {
        check_field(polynomial, combine_modulus)?;
        let combiner = AdditiveCombine::new(combine_modulus)?;
        Self::with_combiner(polynomial, num_points, combine_modulus, combiner)
    }

    /// Commit over a domain sized from the polynomial: twice the smallest
    /// power of two above its coefficient count.
    pub fn for_polynomial(
        polynomial: &Polynomial,
        combine_modulus: u64,
    ) -> Result<Self, CommitError> {
        let num_points = domain_for(polynomial.len())?;
        Self::new(polynomial, num_points, combine_modulus)
    }

    /// Commit using validated [`CommitmentParams`].
    pub fn from_params(
        polynomial: &Polynomial,
        params: &CommitmentParams,
    ) -> Result<Self, CommitError> {
        params.validate()?;
        Self::new(polynomial, params.num_points, params.combine_modulus)
    }
}

impl<C: Combine> EvaluationCommitment<C> {
    /// Commit with a caller-supplied combine strategy.
    pub fn with_combiner(
        polynomial: &Polynomial,
        num_points: usize,
        combine_modulus: u64,
        combiner: C,
    ) -> Result<Self, CommitError> {
        check_field(polynomial, combine_modulus)?;
        if !num_points.is_power_of_two() {
            return Err(CommitError::MalformedDomain(num_points));
        }

        let evaluations = (0..num_points as u64)
            .map(|x| polynomial.evaluate(x))
            .collect();
        let tree = ReductionTree::build(evaluations, &combiner)?;

        debug!(
            num_points,
            depth = tree.depth(),
            root = tree.root(),
            "committed to polynomial evaluations"
        );

        Ok(Self {
            polynomial: polynomial.clone(),
            combine_modulus,
            combiner,
            tree,
        })
    }

    /// The public commitment.
    pub fn root(&self) -> u64 {
        self.tree.root()
    }

    pub fn num_points(&self) -> usize {
        self.tree.num_leaves()
    }

    /// Number of triplets in every proof from this commitment.
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    pub fn evaluations(&self) -> &[u64] {
        self.tree.leaves()
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    pub fn combine_modulus(&self) -> u64 {
        self.combine_modulus
    }

    pub fn combiner(&self) -> &C {
        &self.combiner
    }

    pub fn tree(&self) -> &ReductionTree {
        &self.tree
    }

    /// Authentication path proving the committed value at `point`.
    pub fn prove_point_value(&self, point: u64) -> Result<PointValueProof, CommitError> {
        let num_points = self.num_points();
        let index = usize::try_from(point)
            .ok()
            .filter(|&i| i < num_points)
            .ok_or(CommitError::OutOfDomain { point, num_points })?;

        self.tree.authentication_path(index)
    }
}

fn check_field(polynomial: &Polynomial, combine_modulus: u64) -> Result<(), CommitError> {
    if polynomial.modulus() != combine_modulus {
        return Err(CommitError::FieldMismatch {
            polynomial: polynomial.modulus(),
            combine: combine_modulus,
        });
    }
    Ok(())
}

/// `2 << bit_length(len)`: twice the next power of two above `len`.
fn domain_for(len: usize) -> Result<usize, CommitError> {
    let bits = usize::BITS - len.leading_zeros();
    2usize
        .checked_shl(bits)
        .filter(|&n| n != 0)
        .ok_or(CommitError::MalformedDomain(usize::MAX))
}

// ========== Tests ==========
