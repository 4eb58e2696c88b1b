//! Core types for the fraud engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Floor of the base fraud probability
pub const PROBABILITY_BASE: f64 = 0.1;
/// Probability is never treated as certainty
pub const PROBABILITY_MAX: f64 = 0.95;

/// Limits computed for the `ApplyLimits` action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudLimits {
    /// Cap on the transaction amount
    pub max_amount: Decimal,

    /// Settlement is delayed
    pub delay_settlement: bool,

    /// Extra verification required
    pub require_verification: bool,
}

/// Recommended action. Each variant carries exactly the data meaningful for
/// it; computed limits exist only on `ApplyLimits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FraudAction {
    /// Proceed normally
    Allow,
    /// Proceed under computed limits
    ApplyLimits {
        /// The computed limits
        limits: FraudLimits,
    },
    /// Hold until an extra verification succeeds
    AdditionalVerification,
    /// Do not proceed; the only blocking outcome in the pipeline
    Block,
}

/// Fraud analysis verdict for one transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudVerdict {
    /// Transaction analyzed
    pub transaction_id: Uuid,

    /// Fraud probability, clamped to at most 0.95
    pub probability: f64,

    /// Recommended action
    pub action: FraudAction,

    /// Explanation, present for anything other than a clean allow
    pub reason: Option<String>,
}

impl FraudVerdict {
    /// Whether the verdict blocks the transaction
    pub fn is_block(&self) -> bool {
        matches!(self.action, FraudAction::Block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_format() {
        assert_eq!(
            serde_json::to_string(&FraudAction::Block).unwrap(),
            r#"{"action":"block"}"#
        );

        let json = r#"{"action":"apply_limits","limits":{"max_amount":"52.50","delay_settlement":true,"require_verification":false}}"#;
        let action: FraudAction = serde_json::from_str(json).unwrap();
        match action {
            FraudAction::ApplyLimits { limits } => {
                assert_eq!(limits.max_amount, Decimal::new(5250, 2));
                assert!(limits.delay_settlement);
            }
            other => panic!("expected ApplyLimits, got {other:?}"),
        }
    }
}
