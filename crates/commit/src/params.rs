//! Commitment parameters and configuration.

use serde::{Deserialize, Serialize};

use crate::verify::ChainCheck;

/// Parameters shared by the committer and the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitmentParams {
    /// Size of the evaluation domain `0..num_points` (must be a power of 2).
    pub num_points: usize,

    /// Modulus of the additive combine function. Must equal the field
    /// modulus of any committed polynomial.
    pub combine_modulus: u64,

    /// How strictly verification links consecutive proof triplets.
    pub chain_check: ChainCheck,
}

impl Default for CommitmentParams {
    fn default() -> Self {
        Self {
            num_points: Self::DEFAULT_NUM_POINTS,
            combine_modulus: Self::DEFAULT_COMBINE_MODULUS,
            chain_check: ChainCheck::Strict,
        }
    }
}

impl CommitmentParams {
    pub const DEFAULT_NUM_POINTS: usize = 8;

    pub const DEFAULT_COMBINE_MODULUS: u64 = 100;

    /// Largest domain accepted by [`validate`](Self::validate).
    pub const MAX_NUM_POINTS: usize = 1 << 20;

    /// Set the evaluation domain size.
    pub fn with_num_points(mut self, num_points: usize) -> Result<Self, ParamError> {
        check_num_points(num_points)?;
        self.num_points = num_points;
        Ok(self)
    }

    /// Set the combine modulus.
    pub fn with_combine_modulus(mut self, modulus: u64) -> Result<Self, ParamError> {
        check_modulus(modulus)?;
        self.combine_modulus = modulus;
        Ok(self)
    }

    pub fn with_chain_check(mut self, chain_check: ChainCheck) -> Self {
        self.chain_check = chain_check;
        self
    }

    /// Validate parameters for consistency.
    pub fn validate(&self) -> Result<(), ParamError> {
        check_num_points(self.num_points)?;
        check_modulus(self.combine_modulus)
    }

    /// Number of triplets in a proof for this domain.
    pub fn proof_len(&self) -> usize {
        self.num_points.trailing_zeros() as usize
    }
}

fn check_num_points(num_points: usize) -> Result<(), ParamError> {
    if !num_points.is_power_of_two() {
        return Err(ParamError::InvalidDomain(format!(
            "{num_points} is not a positive power of 2"
        )));
    }
    if num_points > CommitmentParams::MAX_NUM_POINTS {
        return Err(ParamError::InvalidDomain(format!(
            "{num_points} exceeds the maximum of {}",
            CommitmentParams::MAX_NUM_POINTS
        )));
    }
    Ok(())
}

pub(crate) fn check_modulus(modulus: u64) -> Result<(), ParamError> {
    if modulus < 2 {
        return Err(ParamError::InvalidModulus(format!(
            "{modulus} is too small (must be at least 2)"
        )));
    }
    Ok(())
}

/// Parameter validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("Invalid evaluation domain: {0}")]
    InvalidDomain(String),

    #[error("Invalid combine modulus: {0}")]
    InvalidModulus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = CommitmentParams::default();
        assert_eq!(params.num_points, 8);
        assert_eq!(params.combine_modulus, 100);
        assert_eq!(params.chain_check, ChainCheck::Strict);
        assert_eq!(params.proof_len(), 3);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_num_points_validation() {
        let params = CommitmentParams::default().with_num_points(64).unwrap();
        assert_eq!(params.num_points, 64);
        assert_eq!(params.proof_len(), 6);

        assert!(CommitmentParams::default().with_num_points(1).is_ok());
        assert!(CommitmentParams::default().with_num_points(0).is_err());
        assert!(CommitmentParams::default().with_num_points(12).is_err());
        assert!(CommitmentParams::default()
            .with_num_points(CommitmentParams::MAX_NUM_POINTS * 2)
            .is_err());
    }

    #[test]
    fn test_modulus_validation() {
        assert!(CommitmentParams::default().with_combine_modulus(97).is_ok());
        assert!(matches!(
            CommitmentParams::default().with_combine_modulus(1),
            Err(ParamError::InvalidModulus(_))
        ));

        let mut params = CommitmentParams::default();
        params.combine_modulus = 0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_params_serialization() {
        let params = CommitmentParams::default()
            .with_num_points(16)
            .unwrap()
            .with_chain_check(ChainCheck::Skip);
        let json = serde_json::to_string(&params).unwrap();
        let deserialized: CommitmentParams = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, params);
    }

    #[test]
    fn test_params_partial_deserialization() {
        let params: CommitmentParams = serde_json::from_str(r#"{"num_points":32}"#).unwrap();
        assert_eq!(params.num_points, 32);
        assert_eq!(params.combine_modulus, 100);
        assert_eq!(params.chain_check, ChainCheck::Strict);
    }
}
