//! The demonstration scenario: commit to a polynomial, its even/odd halves
//! and a random fold of the two, then prove and verify one random point
//! against every commitment. Also builds the commitment shown by `tree`.

use fri_commit::field::{add_mod, mul_mod};
use fri_commit::{
    CommitError, EvaluationCommitment, ParamError, PointValueProof, PolyError, Polynomial,
    Verifier,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::cfg::DemoConfig;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid polynomial: {0}")]
    Poly(#[from] PolyError),
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamError),
    #[error("commitment failed: {0}")]
    Commit(#[from] CommitError),
}

/// Outcome for one committed polynomial.
#[derive(Debug, Serialize)]
pub struct CommitmentReport {
    pub label: &'static str,
    pub polynomial: String,
    pub root: u64,
    pub value: u64,
    pub proof: PointValueProof,
    pub verified: bool,
}

#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub seed: u64,
    pub modulus: u64,
    pub num_points: usize,
    pub challenge: u64,
    pub point: u64,
    pub split_consistent: bool,
    pub commitments: Vec<CommitmentReport>,
}

impl ScenarioReport {
    pub fn all_verified(&self) -> bool {
        self.split_consistent && self.commitments.iter().all(|c| c.verified)
    }
}

pub fn run(config: &DemoConfig) -> Result<ScenarioReport, DemoError> {
    config.params.validate()?;
    let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
    let params = &config.params;
    let p = config.modulus;

    let poly = Polynomial::new(&config.coefficients, p)?;
    info!(%poly, num_points = params.num_points, "committing to polynomial");

    let (even, odd) = poly.split_even_odd();
    let challenge = rng.gen_range(0..p);
    let folded = poly.fold(challenge);
    debug!(challenge, %even, %odd, %folded, "split and folded");

    // P(x) = E(x^2) + x * O(x^2)
    let point = rng.gen_range(0..params.num_points as u64);
    let square = mul_mod(point, point, p);
    let split_consistent = poly.evaluate(point)
        == add_mod(
            even.evaluate(square),
            mul_mod(point % p, odd.evaluate(square), p),
            p,
        );

    let verifier = Verifier::from_params(params)?;
    let mut commitments = Vec::with_capacity(4);
    for (label, poly) in [
        ("polynomial", &poly),
        ("even", &even),
        ("odd", &odd),
        ("folded", &folded),
    ] {
        let commitment = EvaluationCommitment::from_params(poly, params)?;
        let value = poly.evaluate(point);
        let proof = commitment.prove_point_value(point)?;
        let verified = verifier.verify_against_root(commitment.root(), point, value, &proof);

        info!(label, root = commitment.root(), point, value, verified, "proved point value");
        commitments.push(CommitmentReport {
            label,
            polynomial: poly.to_string(),
            root: commitment.root(),
            value,
            proof,
            verified,
        });
    }

    Ok(ScenarioReport {
        seed: config.seed,
        modulus: p,
        num_points: params.num_points,
        challenge,
        point,
        split_consistent,
        commitments,
    })
}

/// Commitment printed by the `tree` command. Without an explicit domain size
/// the domain is sized from the polynomial.
pub fn tree_commitment(
    config: &DemoConfig,
    num_points: Option<usize>,
) -> Result<(Polynomial, EvaluationCommitment), DemoError> {
    let poly = Polynomial::new(&config.coefficients, config.modulus)?;
    let commitment = match num_points {
        Some(num_points) => {
            let params = config.params.clone().with_num_points(num_points)?;
            EvaluationCommitment::from_params(&poly, &params)?
        }
        None => EvaluationCommitment::for_polynomial(&poly, config.params.combine_modulus)?,
    };
    Ok((poly, commitment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fri_commit::CommitmentParams;

    #[test]
    fn test_default_scenario_verifies() {
        let report = run(&DemoConfig::default()).unwrap();

        assert_eq!(report.commitments.len(), 4);
        assert!(report.point < 8);
        assert!(report.challenge < 100);
        assert!(report.all_verified());
    }

    #[test]
    fn test_scenario_is_seeded() {
        let a = run(&DemoConfig::default()).unwrap();
        let b = run(&DemoConfig::default()).unwrap();
        assert_eq!(a.challenge, b.challenge);
        assert_eq!(a.point, b.point);

        let roots_a: Vec<u64> = a.commitments.iter().map(|c| c.root).collect();
        let roots_b: Vec<u64> = b.commitments.iter().map(|c| c.root).collect();
        assert_eq!(roots_a, roots_b);
    }

    #[test]
    fn test_split_check_tracks_polynomial() {
        for seed in 0..16 {
            let config = DemoConfig {
                coefficients: vec![3, -1, 4, 1, -5, 9],
                modulus: 97,
                seed,
                params: CommitmentParams::default()
                    .with_combine_modulus(97)
                    .unwrap()
                    .with_num_points(16)
                    .unwrap(),
            };
            let report = run(&config).unwrap();
            assert!(report.split_consistent, "seed {seed}");
            assert!(report.all_verified(), "seed {seed}");
        }
    }

    #[test]
    fn test_tree_commitment_domain() {
        let config = DemoConfig {
            coefficients: vec![1, 2, 1],
            modulus: 5,
            params: CommitmentParams::default().with_combine_modulus(5).unwrap(),
            ..DemoConfig::default()
        };

        let (poly, sized) = tree_commitment(&config, None).unwrap();
        assert_eq!(poly.coefficients(), &[1, 2, 1]);
        assert_eq!(sized.num_points(), 8);

        let (_, explicit) = tree_commitment(&config, Some(4)).unwrap();
        assert_eq!(explicit.num_points(), 4);

        assert!(matches!(
            tree_commitment(&config, Some(6)),
            Err(DemoError::Params(_))
        ));
    }

    #[test]
    fn test_scenario_field_mismatch() {
        let mut config = DemoConfig::default();
        config.params.combine_modulus = 97;
        assert!(matches!(
            run(&config),
            Err(DemoError::Commit(CommitError::FieldMismatch { .. }))
        ));
    }

    #[test]
    fn test_scenario_bad_domain() {
        let mut config = DemoConfig::default();
        config.params.num_points = 12;
        assert!(matches!(run(&config), Err(DemoError::Params(_))));
    }
}
