//! # fri-commit
//!
//! Toy FRI-style polynomial commitments over a small prime field.
//!
//! A prover commits to the evaluations of a polynomial over `0..N` by
//! reducing them with a binary tree, publishes the root, and later proves
//! single evaluations with an authentication path. A verifier checks the path
//! without access to the rest of the evaluation table.
//!
//! ## Architecture
//!
//! - **Field**: modular arithmetic helpers and the modular inverse
//! - **Polynomial**: dense polynomials over `Z_p` (add, multiply, divide)
//! - **Combine**: pluggable parent-from-children function for the tree
//! - **Tree**: bottom-up reduction tree and authentication paths
//! - **Commitment**: evaluate, commit, prove
//! - **Verify**: stateless proof checking with configurable chain strictness
//!
//! ## Not a secure scheme
//!
//! The default combine function is addition modulo a small modulus. Collisions
//! are trivial to find; this crate is for studying commitment mechanics only.
//!
//! ## Example
//!
//! ```
//! use fri_commit::{verify_point_value, EvaluationCommitment, Polynomial};
//!
//! let poly = Polynomial::new(&[1, 4, 6, 4, 1], 100).unwrap();
//! let commitment = EvaluationCommitment::new(&poly, 8, 100).unwrap();
//!
//! let value = poly.evaluate(2);
//! let proof = commitment.prove_point_value(2).unwrap();
//! assert!(verify_point_value(2, value, &proof, 100));
//! ```

pub mod combine;
pub mod commitment;
pub mod field;
pub mod params;
pub mod polynomial;
pub mod proof;
pub mod tree;
pub mod verify;

pub use combine::{AdditiveCombine, Combine};
pub use commitment::{CommitError, EvaluationCommitment};
pub use field::mod_inv;
pub use params::{CommitmentParams, ParamError};
pub use polynomial::{PolyError, Polynomial};
pub use proof::{PointValueProof, Triplet};
pub use tree::ReductionTree;
pub use verify::{verify_point_value, ChainCheck, VerifyError, Verifier};

/// Library version for protocol compatibility.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }
}
