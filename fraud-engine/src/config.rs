//! Configuration for the fraud engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fraud heuristic thresholds and adjustment knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudConfig {
    /// Probability above which verification (or block) is demanded
    pub verification_threshold: f64,

    /// Probability above which computed limits apply
    pub limit_threshold: f64,

    /// Within the limits band: delay settlement above this probability
    pub delay_threshold: f64,

    /// Within the limits band: require verification above this probability
    pub extra_verification_threshold: f64,

    /// Amounts below this count as small for the new-user discount
    pub small_transaction_threshold: Decimal,

    /// Account age below which a user counts as new (days)
    pub new_account_days: i64,

    /// Account age below which the strongest new-account surcharge applies
    pub very_new_account_days: i64,

    /// Historical success ratio below which a surcharge applies
    pub poor_history_ratio: f64,

    /// Cap bases by transaction count: none / under five / under twenty /
    /// established
    pub cap_no_history: Decimal,
    /// Cap base for users with fewer than five transactions
    pub cap_under_five: Decimal,
    /// Cap base for users with fewer than twenty transactions
    pub cap_under_twenty: Decimal,
    /// Cap base for established users
    pub cap_established: Decimal,
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            verification_threshold: 0.8,
            limit_threshold: 0.5,
            delay_threshold: 0.65,
            extra_verification_threshold: 0.75,
            small_transaction_threshold: Decimal::from(100),
            new_account_days: 30,
            very_new_account_days: 7,
            poor_history_ratio: 0.7,
            cap_no_history: Decimal::from(50),
            cap_under_five: Decimal::from(150),
            cap_under_twenty: Decimal::from(400),
            cap_established: Decimal::from(1_000),
        }
    }
}
