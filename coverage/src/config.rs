//! Configuration for coverage underwriting

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Coverage eligibility gates and pricing knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Minimum reputation score for eligibility
    pub min_score: f64,

    /// Minimum account age in days for eligibility
    pub min_account_age_days: i64,

    /// Minimum successful verifications for eligibility
    pub min_verifications: u32,

    /// Hard ceiling on any coverage limit
    pub max_coverage_limit: Decimal,

    /// Coverage limit never exceeds this multiple of the transaction amount
    pub amount_multiple_cap: Decimal,

    /// Claims must be filed within this many days of the transaction
    pub claim_window_days: i64,

    /// Claims may request at most this multiple of the transaction amount
    pub max_claim_multiple: Decimal,

    /// Base premium rate before the reputation discount
    pub base_premium_rate: f64,

    /// Maximum premium rate discount earned at a perfect score
    pub max_premium_discount: f64,

    /// Minimum premium regardless of amount
    pub min_premium: Decimal,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            min_score: 10.0,
            min_account_age_days: 7,
            min_verifications: 1,
            max_coverage_limit: Decimal::from(5_000),
            amount_multiple_cap: Decimal::from(5),
            claim_window_days: 30,
            max_claim_multiple: Decimal::from(2),
            base_premium_rate: 0.02,
            max_premium_discount: 0.015,
            min_premium: Decimal::new(50, 2),
        }
    }
}
