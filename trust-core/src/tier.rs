//! Access tiers and the score-to-tier threshold policy
//!
//! Tier thresholds are deliberately configuration, not constants: the
//! mapping from reputation score to access level is a product decision and
//! hosts tune it per market.

use crate::types::LimitTriple;
use serde::{Deserialize, Serialize};

/// Named access level determining base transaction limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    /// Entry tier for thin-file and newly onboarded users
    Basic,
    /// Established users with consistent history
    Standard,
    /// Highest tier, full limits
    Full,
}

/// Maps a reputation score to an access tier and its base limits
pub trait TierPolicy: Send + Sync {
    /// Tier for a score
    fn tier_for(&self, score: f64) -> AccessTier;

    /// Base single/daily/monthly limits for a tier
    fn base_limits(&self, tier: AccessTier) -> LimitTriple;
}

/// Tier threshold configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    /// Minimum score for the Standard tier
    pub standard_min_score: f64,

    /// Minimum score for the Full tier
    pub full_min_score: f64,

    /// Base limits for the Basic tier
    pub basic_limits: LimitTriple,

    /// Base limits for the Standard tier
    pub standard_limits: LimitTriple,

    /// Base limits for the Full tier
    pub full_limits: LimitTriple,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            standard_min_score: 40.0,
            full_min_score: 70.0,
            basic_limits: LimitTriple::from_dollars(50, 200, 1_000),
            standard_limits: LimitTriple::from_dollars(500, 2_000, 10_000),
            full_limits: LimitTriple::from_dollars(2_500, 10_000, 50_000),
        }
    }
}

/// Default threshold-based tier policy
#[derive(Debug, Clone)]
pub struct ThresholdTierPolicy {
    config: TierConfig,
}

impl ThresholdTierPolicy {
    /// Create a policy from config
    pub fn new(config: TierConfig) -> Self {
        Self { config }
    }
}

impl Default for ThresholdTierPolicy {
    fn default() -> Self {
        Self::new(TierConfig::default())
    }
}

impl TierPolicy for ThresholdTierPolicy {
    fn tier_for(&self, score: f64) -> AccessTier {
        if score >= self.config.full_min_score {
            AccessTier::Full
        } else if score >= self.config.standard_min_score {
            AccessTier::Standard
        } else {
            AccessTier::Basic
        }
    }

    fn base_limits(&self, tier: AccessTier) -> LimitTriple {
        match tier {
            AccessTier::Basic => self.config.basic_limits,
            AccessTier::Standard => self.config.standard_limits,
            AccessTier::Full => self.config.full_limits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        let policy = ThresholdTierPolicy::default();

        assert_eq!(policy.tier_for(0.0), AccessTier::Basic);
        assert_eq!(policy.tier_for(39.9), AccessTier::Basic);
        assert_eq!(policy.tier_for(40.0), AccessTier::Standard);
        assert_eq!(policy.tier_for(69.9), AccessTier::Standard);
        assert_eq!(policy.tier_for(70.0), AccessTier::Full);
        assert_eq!(policy.tier_for(100.0), AccessTier::Full);
    }

    #[test]
    fn test_base_limits_increase_by_tier() {
        let policy = ThresholdTierPolicy::default();

        let basic = policy.base_limits(AccessTier::Basic);
        let standard = policy.base_limits(AccessTier::Standard);
        let full = policy.base_limits(AccessTier::Full);

        assert!(basic.single < standard.single);
        assert!(standard.single < full.single);
        assert!(basic.monthly < standard.monthly);
        assert!(standard.monthly < full.monthly);
    }
}
