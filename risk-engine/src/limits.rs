//! Per-user transaction limit derivation
//!
//! Limits start from the tier base table and scale with reputation:
//! `base * (1 + score/100)`, capped at 2x the tier base. A perfect score
//! exactly doubles the tier base; a zero score leaves it unchanged.

use rust_decimal::Decimal;
use std::sync::Arc;
use trust_core::{LimitTriple, TierPolicy, TrustProfile};

/// Derives spending ceilings from tier and reputation score
pub struct TransactionLimitPolicy {
    tier_policy: Arc<dyn TierPolicy>,
}

impl TransactionLimitPolicy {
    /// Create a policy over a tier-threshold policy
    pub fn new(tier_policy: Arc<dyn TierPolicy>) -> Self {
        Self { tier_policy }
    }

    /// Single/daily/monthly limits for a profile
    pub fn limits_for(&self, profile: &TrustProfile) -> LimitTriple {
        let tier = self.tier_policy.tier_for(profile.score);
        let base = self.tier_policy.base_limits(tier);

        let multiplier = 1.0 + (profile.score / 100.0).clamp(0.0, 1.0);
        let multiplier = Decimal::try_from(multiplier).unwrap_or(Decimal::ONE);

        LimitTriple {
            single: (base.single * multiplier).min(base.single * Decimal::TWO),
            daily: (base.daily * multiplier).min(base.daily * Decimal::TWO),
            monthly: (base.monthly * multiplier).min(base.monthly * Decimal::TWO),
        }
    }
}
