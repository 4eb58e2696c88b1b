//! Core types for the risk engine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Floor of the final risk score
pub const RISK_SCORE_MIN: f64 = 5.0;
/// Ceiling of the final risk score
pub const RISK_SCORE_MAX: f64 = 95.0;

/// One weighted factor's contribution to the overall score.
///
/// Verdicts are write-only on the wire: produced here, recorded, and read
/// back as structured data by consumers, never deserialized into this type.
/// That keeps `name` a static factor label.
#[derive(Debug, Clone, Serialize)]
pub struct FactorScore {
    /// Factor name (e.g. "amount_vs_limit")
    pub name: &'static str,

    /// Normalized factor score (0-100)
    pub score: f64,

    /// Weight applied when combining factors
    pub weight: f64,
}

impl FactorScore {
    /// Weighted contribution to the combined score
    pub fn weighted(&self) -> f64 {
        self.score * self.weight
    }
}

/// Restrictions attached to an allowed transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Restrictions {
    /// Cap on the amount the transaction may settle for
    pub max_amount: Option<Decimal>,

    /// Extra verification required before settlement
    pub require_verification: bool,

    /// Settlement is delayed rather than immediate
    pub delay_settlement: bool,

    /// Only previously-used recipients are permitted
    pub limit_recipients: bool,
}

impl Restrictions {
    /// Whether any restriction is actually in effect
    pub fn is_empty(&self) -> bool {
        self.max_amount.is_none()
            && !self.require_verification
            && !self.delay_settlement
            && !self.limit_recipients
    }
}

/// Per-transaction risk verdict, immutable once recorded.
///
/// `allowed` is always true under the restriction-only policy; it is kept
/// in the record so downstream consumers never have to assume it.
#[derive(Debug, Clone, Serialize)]
pub struct RiskVerdict {
    /// Transaction this verdict applies to
    pub transaction_id: Uuid,

    /// Always true: risk is mitigated by restriction, not denial
    pub allowed: bool,

    /// Final risk score, clamped to [5, 95]
    pub risk_score: f64,

    /// Restrictions in effect, if any
    pub restrictions: Option<Restrictions>,

    /// Human-readable explanation of the verdict
    pub reason: String,

    /// Per-factor breakdown, for explainability
    pub factors: Vec<FactorScore>,

    /// Assessment timestamp
    pub assessed_at: DateTime<Utc>,
}

impl RiskVerdict {
    /// Whether the verdict carries any effective restriction
    pub fn is_restricted(&self) -> bool {
        self.restrictions
            .as_ref()
            .map(|r| !r.is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_restrictions_are_empty() {
        assert!(Restrictions::default().is_empty());
    }

    #[test]
    fn test_amounts_serialize_as_strings() {
        let restrictions = Restrictions {
            max_amount: Some(Decimal::from(25)),
            ..Restrictions::default()
        };
        let json = serde_json::to_string(&restrictions).unwrap();
        assert!(json.contains("\"25\""));
    }

    #[test]
    fn test_verdict_serializes_with_factor_breakdown() {
        let verdict = RiskVerdict {
            transaction_id: Uuid::new_v4(),
            allowed: true,
            risk_score: 57.75,
            restrictions: None,
            reason: "elevated".to_string(),
            factors: vec![FactorScore {
                name: "amount_vs_limit",
                score: 80.0,
                weight: 0.35,
            }],
            assessed_at: Utc::now(),
        };

        let json = serde_json::to_string(&verdict).unwrap();
        assert!(json.contains("\"amount_vs_limit\""));
        assert!(json.contains("\"allowed\":true"));
    }
}
