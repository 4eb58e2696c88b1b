//! Coverage eligibility, limits, and premium pricing
//!
//! Eligibility is a set of hard gates, not a score: any failure yields
//! `NotCovered` with the specific gate named. The limit grows with
//! reputation, account age, and verifications, and is capped by the
//! configured ceiling and a multiple of the transaction amount. Premium
//! rate shrinks with reputation down to a floor.

use crate::config::CoverageConfig;
use crate::types::CoverageDecision;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;
use trust_core::{Transaction, TransactionStatus, TrustProfile};

/// Underwrites completed transactions for coverage
pub struct CoverageUnderwriter {
    config: CoverageConfig,
}

impl Default for CoverageUnderwriter {
    fn default() -> Self {
        Self::new(CoverageConfig::default())
    }
}

impl CoverageUnderwriter {
    /// Create an underwriter from config
    pub fn new(config: CoverageConfig) -> Self {
        Self { config }
    }

    /// Pricing/eligibility knobs in effect
    pub fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Evaluate a transaction for coverage
    pub fn evaluate(&self, transaction: &Transaction, profile: &TrustProfile) -> CoverageDecision {
        self.evaluate_at(transaction, profile, Utc::now())
    }

    /// Evaluate as of `now` (deterministic for tests)
    pub fn evaluate_at(
        &self,
        transaction: &Transaction,
        profile: &TrustProfile,
        now: DateTime<Utc>,
    ) -> CoverageDecision {
        if transaction.status != TransactionStatus::Completed {
            return CoverageDecision::NotCovered {
                reason: "only completed transactions are eligible for coverage".to_string(),
            };
        }

        if profile.score < self.config.min_score {
            return CoverageDecision::NotCovered {
                reason: format!(
                    "reputation score {:.1} below required {:.1}",
                    profile.score, self.config.min_score
                ),
            };
        }

        let age_days = profile.account_age_days_at(now);
        if age_days < self.config.min_account_age_days {
            return CoverageDecision::NotCovered {
                reason: format!(
                    "account age {age_days} days below required {}",
                    self.config.min_account_age_days
                ),
            };
        }

        if profile.verification_count < self.config.min_verifications {
            return CoverageDecision::NotCovered {
                reason: format!(
                    "{} verifications on record, {} required",
                    profile.verification_count, self.config.min_verifications
                ),
            };
        }

        let limit = self.coverage_limit(transaction.amount, profile, age_days);
        let premium = self.premium(transaction.amount, profile.score);

        debug!(
            transaction_id = %transaction.id,
            %limit,
            %premium,
            "coverage granted"
        );

        CoverageDecision::Covered { limit, premium }
    }

    // base = 50 + 2*score, scaled up by account age and verifications,
    // capped by the ceiling and 5x the transaction amount
    fn coverage_limit(&self, amount: Decimal, profile: &TrustProfile, age_days: i64) -> Decimal {
        let mut base = 50.0 + profile.score * 2.0;

        if age_days > 90 {
            base *= 2.0;
        } else if age_days > 30 {
            base *= 1.5;
        }

        base *= 1.0 + f64::from(profile.verification_count) * 0.25;

        let base = Decimal::try_from(base).unwrap_or(self.config.max_coverage_limit);
        base.min(self.config.max_coverage_limit)
            .min(amount * self.config.amount_multiple_cap)
            .round_dp(2)
    }

    fn premium(&self, amount: Decimal, score: f64) -> Decimal {
        let discount = (score / 100.0 * self.config.max_premium_discount)
            .min(self.config.max_premium_discount);
        let rate = self.config.base_premium_rate - discount;
        let rate = Decimal::try_from(rate).unwrap_or(Decimal::ZERO);
        (amount * rate).max(self.config.min_premium).round_dp(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn profile(score: f64, verifications: u32, age_days: i64) -> TrustProfile {
        let mut profile = TrustProfile::new(Uuid::new_v4());
        profile.score = score;
        profile.verification_count = verifications;
        profile.created_at = Utc::now() - Duration::days(age_days);
        profile
    }

    fn completed_tx(user_id: Uuid, amount: i64) -> Transaction {
        let mut tx = Transaction::new(user_id, Decimal::from(amount), None);
        tx.status = TransactionStatus::Completed;
        tx
    }

    #[test]
    fn test_pending_transaction_not_covered() {
        let underwriter = CoverageUnderwriter::default();
        let profile = profile(50.0, 2, 100);
        let tx = Transaction::new(profile.user_id, Decimal::from(100), None);

        let decision = underwriter.evaluate(&tx, &profile);
        assert!(!decision.is_covered());
    }

    #[test]
    fn test_each_eligibility_gate_names_itself() {
        let underwriter = CoverageUnderwriter::default();

        let low_score = profile(5.0, 2, 100);
        let young = profile(50.0, 2, 3);
        let unverified = profile(50.0, 0, 100);

        for (p, needle) in [
            (&low_score, "reputation score"),
            (&young, "account age"),
            (&unverified, "verifications"),
        ] {
            let tx = completed_tx(p.user_id, 100);
            match underwriter.evaluate(&tx, p) {
                CoverageDecision::NotCovered { reason } => {
                    assert!(reason.contains(needle), "reason {reason:?} missing {needle:?}");
                }
                other => panic!("expected NotCovered, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_limit_and_premium_arithmetic() {
        // score 50, age 100d, 2 verifications, $1000 transaction:
        // base 150 * 2 (age) * 1.5 (verifications) = 450
        // rate 0.02 - 0.0075 = 0.0125 -> premium 12.50
        let underwriter = CoverageUnderwriter::default();
        let profile = profile(50.0, 2, 100);
        let tx = completed_tx(profile.user_id, 1_000);

        match underwriter.evaluate(&tx, &profile) {
            CoverageDecision::Covered { limit, premium } => {
                assert_eq!(limit, Decimal::from(450));
                assert_eq!(premium, Decimal::new(1250, 2));
            }
            other => panic!("expected Covered, got {other:?}"),
        }
    }

    #[test]
    fn test_limit_capped_by_transaction_amount() {
        let underwriter = CoverageUnderwriter::default();
        let profile = profile(80.0, 3, 120);
        let tx = completed_tx(profile.user_id, 10);

        match underwriter.evaluate(&tx, &profile) {
            CoverageDecision::Covered { limit, .. } => {
                assert_eq!(limit, Decimal::from(50)); // 5x the $10 amount
            }
            other => panic!("expected Covered, got {other:?}"),
        }
    }

    #[test]
    fn test_limit_never_exceeds_ceiling() {
        let underwriter = CoverageUnderwriter::default();
        // Heavily verified veteran: raw base far above the ceiling
        let profile = profile(100.0, 40, 365);
        let tx = completed_tx(profile.user_id, 100_000);

        match underwriter.evaluate(&tx, &profile) {
            CoverageDecision::Covered { limit, .. } => {
                assert_eq!(limit, Decimal::from(5_000));
            }
            other => panic!("expected Covered, got {other:?}"),
        }
    }

    #[test]
    fn test_premium_floor() {
        let underwriter = CoverageUnderwriter::default();
        let profile = profile(100.0, 2, 100);
        let tx = completed_tx(profile.user_id, 40);

        match underwriter.evaluate(&tx, &profile) {
            // 40 * 0.005 = 0.20, floored to 0.50
            CoverageDecision::Covered { premium, .. } => {
                assert_eq!(premium, Decimal::new(50, 2));
            }
            other => panic!("expected Covered, got {other:?}"),
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn limit_bounded_by_ceiling_and_amount(
                amount in 1i64..1_000_000,
                score in 10.0f64..100.0,
                verifications in 1u32..50,
                age_days in 7i64..1000,
            ) {
                let underwriter = CoverageUnderwriter::default();
                let profile = profile(score, verifications, age_days);
                let tx = completed_tx(profile.user_id, amount);

                if let CoverageDecision::Covered { limit, premium } =
                    underwriter.evaluate(&tx, &profile)
                {
                    prop_assert!(limit <= Decimal::from(5_000));
                    prop_assert!(limit <= tx.amount * Decimal::from(5));
                    prop_assert!(premium >= Decimal::new(50, 2));
                }
            }
        }
    }
}
