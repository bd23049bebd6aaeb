//! Configuration for fingerprinting and group statistics
//!
//! The defaults reproduce the legacy analysis exactly: branch-digit
//! fingerprints and a group variance that collapses to zero below three
//! samples.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a trace's call graph is reduced to a grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FingerprintScheme {
    /// Leading digit of every `<d>.1` occurrence in the traversal (legacy key format)
    #[default]
    BranchDigits,
    /// FNV-1a hash over the full ordered node-id sequence
    NodeSequence,
}

/// Configuration for a single analysis run
///
/// # Example
/// ```
/// use tracegroup::config::{AnalysisConfig, FingerprintScheme};
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.scheme, FingerprintScheme::BranchDigits);
/// assert_eq!(config.min_variance_samples, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fingerprint scheme used as the grouping key
    pub scheme: FingerprintScheme,

    /// Minimum group size for a non-zero response-time variance
    ///
    /// Default: 3, i.e. variance uses divisor `n - 1` only when `n - 1 > 1`.
    /// At `n = 2` the legacy analysis reports zero; set this to 2 to get the
    /// ordinary sample variance instead.
    pub min_variance_samples: usize,

    /// Minimum samples per edge before a covariance matrix is computed
    ///
    /// Default: 2
    pub min_covariance_samples: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scheme: FingerprintScheme::BranchDigits,
            min_variance_samples: 3,
            min_covariance_samples: 2,
        }
    }
}

impl AnalysisConfig {
    /// Legacy-compatible configuration (same as `Default`)
    pub fn legacy() -> Self {
        Self::default()
    }

    /// Collision-resistant keys and ordinary `n - 1` sample variance
    pub fn standard() -> Self {
        Self {
            scheme: FingerprintScheme::NodeSequence,
            min_variance_samples: 2,
            min_covariance_samples: 2,
        }
    }

    /// Parse a configuration from TOML text; missing keys take their defaults
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_variance_samples < 2 {
            return Err(format!(
                "min_variance_samples must be >= 2, got {}",
                self.min_variance_samples
            ));
        }

        if self.min_covariance_samples < 2 {
            return Err(format!(
                "min_covariance_samples must be >= 2, got {}",
                self.min_covariance_samples
            ));
        }

        Ok(())
    }
}
