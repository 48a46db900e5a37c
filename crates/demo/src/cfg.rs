//! Demo configuration loaded from an optional TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fri_commit::{ChainCheck, CommitmentParams};
use serde::Deserialize;
use tracing::info;

/// Demonstration settings: which polynomial to commit to and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    pub coefficients: Vec<i64>,
    pub modulus: u64,
    pub seed: u64,
    pub params: CommitmentParams,
}

impl DemoConfig {
    /// Load settings from a TOML file, falling back to defaults for anything
    /// the file leaves out. A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        let candidate = path.map(PathBuf::from).unwrap_or_else(default_config_path);
        if !candidate.exists() {
            if let Some(explicit) = path {
                anyhow::bail!("configuration file {} not found", explicit.display());
            }
            return Ok(config);
        }

        let contents = fs::read_to_string(&candidate)
            .with_context(|| format!("failed to read config at {}", candidate.display()))?;
        let raw: RawDemoConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config at {}", candidate.display()))?;
        config.apply(raw);

        info!(path = %candidate.display(), "loaded configuration overrides");
        Ok(config)
    }

    fn apply(&mut self, raw: RawDemoConfig) {
        if let Some(coefficients) = raw.coefficients {
            self.coefficients = coefficients;
        }
        if let Some(modulus) = raw.modulus {
            self.modulus = modulus;
            self.params.combine_modulus = modulus;
        }
        if let Some(seed) = raw.seed {
            self.seed = seed;
        }
        if let Some(commitment) = raw.commitment {
            if let Some(num_points) = commitment.num_points {
                self.params.num_points = num_points;
            }
            if let Some(combine_modulus) = commitment.combine_modulus {
                self.params.combine_modulus = combine_modulus;
            }
            if let Some(chain_check) = commitment.chain_check {
                self.params.chain_check = chain_check;
            }
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            coefficients: vec![1, 4, 6, 4, 1],
            modulus: CommitmentParams::DEFAULT_COMBINE_MODULUS,
            seed: 0,
            params: CommitmentParams::default(),
        }
    }
}

fn default_config_path() -> PathBuf {
    PathBuf::from("fri-demo.toml")
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawDemoConfig {
    coefficients: Option<Vec<i64>>,
    modulus: Option<u64>,
    seed: Option<u64>,
    commitment: Option<RawCommitmentConfig>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawCommitmentConfig {
    num_points: Option<usize>,
    combine_modulus: Option<u64>,
    chain_check: Option<ChainCheck>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DemoConfig::default();
        assert_eq!(config.coefficients, vec![1, 4, 6, 4, 1]);
        assert_eq!(config.modulus, 100);
        assert_eq!(config.params.combine_modulus, 100);
        assert_eq!(config.params.num_points, 8);
    }

    #[test]
    fn test_apply_overrides() {
        let raw: RawDemoConfig = toml::from_str(
            r#"
            coefficients = [3, -1, 2]
            modulus = 97
            seed = 9

            [commitment]
            num_points = 16
            chain_check = "skip"
            "#,
        )
        .unwrap();

        let mut config = DemoConfig::default();
        config.apply(raw);

        assert_eq!(config.coefficients, vec![3, -1, 2]);
        assert_eq!(config.modulus, 97);
        assert_eq!(config.seed, 9);
        assert_eq!(config.params.combine_modulus, 97);
        assert_eq!(config.params.num_points, 16);
        assert_eq!(config.params.chain_check, ChainCheck::Skip);
    }

    #[test]
    fn test_missing_explicit_file() {
        let path = Path::new("/nonexistent/fri-demo.toml");
        assert!(DemoConfig::load(Some(path)).is_err());
    }
}
