//! Aggregated configuration for the decision pipeline

use crate::error::{Error, Result};
use coverage::CoverageConfig;
use fraud_engine::FraudConfig;
use risk_engine::FactorWeights;
use serde::{Deserialize, Serialize};
use trust_core::TierConfig;

/// Pipeline configuration: one section per component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tier thresholds and base limits
    pub tiers: TierConfig,

    /// Risk factor weights
    pub weights: FactorWeights,

    /// Fraud heuristic thresholds
    pub fraud: FraudConfig,

    /// Coverage eligibility and pricing
    pub coverage: CoverageConfig,
}

impl Config {
    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Load defaults with environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(value) = std::env::var("TRUSTRAIL_STANDARD_TIER_MIN") {
            config.tiers.standard_min_score = value
                .parse()
                .map_err(|e| Error::Config(format!("TRUSTRAIL_STANDARD_TIER_MIN: {e}")))?;
        }

        if let Ok(value) = std::env::var("TRUSTRAIL_FULL_TIER_MIN") {
            config.tiers.full_min_score = value
                .parse()
                .map_err(|e| Error::Config(format!("TRUSTRAIL_FULL_TIER_MIN: {e}")))?;
        }

        if let Ok(value) = std::env::var("TRUSTRAIL_CLAIM_WINDOW_DAYS") {
            config.coverage.claim_window_days = value
                .parse()
                .map_err(|e| Error::Config(format!("TRUSTRAIL_CLAIM_WINDOW_DAYS: {e}")))?;
        }

        Ok(config)
    }
}
