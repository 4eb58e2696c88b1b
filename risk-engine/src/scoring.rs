//! Five-factor weighted risk scoring
//!
//! Each factor normalizes to 0-100; the weighted sum is discounted by
//! reputation (up to 50% off at a perfect score) and clamped to [5, 95].
//! The decision policy is strictly additive restriction: no combination of
//! inputs produces a denial.

use crate::config::FactorWeights;
use crate::error::Result;
use crate::limits::TransactionLimitPolicy;
use crate::types::{FactorScore, Restrictions, RiskVerdict, RISK_SCORE_MAX, RISK_SCORE_MIN};
use chrono::{Timelike, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;
use trust_core::{Transaction, TransactionStatus, TrustProfile};

/// Risk score above which the heaviest restrictions apply
const HIGH_RISK_THRESHOLD: f64 = 80.0;
/// Risk score above which amount caps apply
const ELEVATED_RISK_THRESHOLD: f64 = 50.0;
/// Extra verification kicks in above this score (elevated band)
const VERIFICATION_THRESHOLD: f64 = 70.0;
/// Settlement delay kicks in above this score (elevated band)
const DELAY_THRESHOLD: f64 = 60.0;

/// Start of the business-hours window (UTC hour, inclusive)
const BUSINESS_HOURS_START: u32 = 9;
/// End of the business-hours window (UTC hour, exclusive)
const BUSINESS_HOURS_END: u32 = 17;

/// Multi-factor transaction risk engine
pub struct RiskEngine {
    weights: FactorWeights,
    limit_policy: TransactionLimitPolicy,
}

impl RiskEngine {
    /// Create an engine; fails when the weights are not a distribution
    pub fn new(weights: FactorWeights, limit_policy: TransactionLimitPolicy) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            weights,
            limit_policy,
        })
    }

    /// Assess a transaction against the user's profile and recent history.
    ///
    /// `recent` is the user's prior transactions, newest first; the
    /// transaction under assessment must not be among them.
    pub fn evaluate(
        &self,
        transaction: &Transaction,
        profile: &TrustProfile,
        recent: &[Transaction],
    ) -> RiskVerdict {
        let limits = self.limit_policy.limits_for(profile);

        let factors = vec![
            FactorScore {
                name: "amount_vs_limit",
                score: amount_factor(transaction.amount, limits.single),
                weight: self.weights.amount_vs_limit,
            },
            FactorScore {
                name: "user_history",
                score: history_factor(profile.total_transactions),
                weight: self.weights.user_history,
            },
            FactorScore {
                name: "recipient_history",
                score: recipient_factor(transaction, recent),
                weight: self.weights.recipient_history,
            },
            FactorScore {
                name: "amount_pattern",
                score: pattern_factor(transaction.amount, recent),
                weight: self.weights.amount_pattern,
            },
            FactorScore {
                name: "time_of_day",
                score: time_of_day_factor(transaction),
                weight: self.weights.time_of_day,
            },
        ];

        let weighted: f64 = factors.iter().map(FactorScore::weighted).sum();

        // Reputation discounts risk, it never vetoes the assessment
        let discount = (profile.score / 100.0).clamp(0.0, 1.0) * 0.5;
        let risk_score = (weighted * (1.0 - discount)).clamp(RISK_SCORE_MIN, RISK_SCORE_MAX);

        let restrictions = self.restrictions_for(risk_score, transaction.amount, limits.single);
        let reason = describe(risk_score, &factors, restrictions.as_ref());

        debug!(
            transaction_id = %transaction.id,
            user_id = %transaction.user_id,
            risk_score,
            discount,
            "risk assessed"
        );

        RiskVerdict {
            transaction_id: transaction.id,
            allowed: true,
            risk_score,
            restrictions,
            reason,
            factors,
            assessed_at: Utc::now(),
        }
    }

    // Additive restriction policy: higher risk stacks more restrictions,
    // nothing removes the allow.
    fn restrictions_for(
        &self,
        risk_score: f64,
        amount: Decimal,
        single_limit: Decimal,
    ) -> Option<Restrictions> {
        if risk_score > HIGH_RISK_THRESHOLD {
            return Some(Restrictions {
                max_amount: Some(single_limit * Decimal::new(25, 2)),
                require_verification: true,
                delay_settlement: true,
                limit_recipients: true,
            });
        }

        if risk_score > ELEVATED_RISK_THRESHOLD {
            return Some(Restrictions {
                max_amount: Some(single_limit * Decimal::new(50, 2)),
                require_verification: risk_score > VERIFICATION_THRESHOLD,
                delay_settlement: risk_score > DELAY_THRESHOLD,
                limit_recipients: false,
            });
        }

        if amount > single_limit {
            return Some(Restrictions {
                max_amount: Some(single_limit),
                ..Restrictions::default()
            });
        }

        None
    }
}

fn amount_factor(amount: Decimal, single_limit: Decimal) -> f64 {
    if single_limit <= Decimal::ZERO {
        return 100.0;
    }
    let ratio = (amount / single_limit).to_f64().unwrap_or(1.0);
    (ratio * 100.0).min(100.0)
}

fn history_factor(total_transactions: u32) -> f64 {
    match total_transactions {
        0 => 70.0,
        1..=4 => 40.0,
        5..=9 => 20.0,
        _ => 10.0,
    }
}

fn recipient_factor(transaction: &Transaction, recent: &[Transaction]) -> f64 {
    let known = transaction.recipient.as_ref().is_some_and(|recipient| {
        recent.iter().any(|tx| {
            tx.status == TransactionStatus::Completed && tx.recipient.as_ref() == Some(recipient)
        })
    });
    if known {
        15.0
    } else {
        50.0
    }
}

fn pattern_factor(amount: Decimal, recent: &[Transaction]) -> f64 {
    if recent.len() < 5 {
        // Not enough history to call anything an anomaly
        return 30.0;
    }
    let window = &recent[..5];
    let total: Decimal = window.iter().map(|tx| tx.amount).sum();
    let mean = total / Decimal::from(window.len() as u32);
    if mean <= Decimal::ZERO {
        return 30.0;
    }
    if amount > mean * Decimal::from(3) {
        70.0
    } else if amount > mean * Decimal::new(15, 1) {
        50.0
    } else {
        15.0
    }
}

fn time_of_day_factor(transaction: &Transaction) -> f64 {
    let hour = transaction.created_at.hour();
    if (BUSINESS_HOURS_START..BUSINESS_HOURS_END).contains(&hour) {
        15.0
    } else {
        25.0
    }
}

fn describe(risk_score: f64, factors: &[FactorScore], restrictions: Option<&Restrictions>) -> String {
    let dominant = factors
        .iter()
        .max_by(|a, b| {
            a.weighted()
                .partial_cmp(&b.weighted())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|f| f.name)
        .unwrap_or("unknown");

    if risk_score > HIGH_RISK_THRESHOLD {
        format!(
            "high risk ({risk_score:.0}/100, driven by {dominant}): amount capped at 25% of \
             limit, extra verification and delayed settlement required, recipients limited"
        )
    } else if risk_score > ELEVATED_RISK_THRESHOLD {
        format!(
            "elevated risk ({risk_score:.0}/100, driven by {dominant}): amount capped at 50% of limit"
        )
    } else if restrictions.is_some() {
        format!("low risk ({risk_score:.0}/100): requested amount capped to the single-transaction limit")
    } else {
        format!("low risk ({risk_score:.0}/100): no restrictions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;
    use trust_core::ThresholdTierPolicy;
    use uuid::Uuid;

    fn engine() -> RiskEngine {
        RiskEngine::new(
            FactorWeights::default(),
            TransactionLimitPolicy::new(Arc::new(ThresholdTierPolicy::default())),
        )
        .unwrap()
    }

    fn profile(score: f64, positive: u32, total: u32, verifications: u32, age_days: i64) -> TrustProfile {
        let mut profile = TrustProfile::new(Uuid::new_v4());
        profile.score = score;
        profile.positive_transactions = positive;
        profile.total_transactions = total;
        profile.verification_count = verifications;
        profile.created_at = Utc::now() - Duration::days(age_days);
        profile
    }

    fn business_hours_tx(user_id: Uuid, amount: i64, recipient: Option<&str>) -> Transaction {
        let mut tx = Transaction::new(user_id, Decimal::from(amount), recipient.map(String::from));
        tx.created_at = Utc.with_ymd_and_hms(2026, 3, 4, 11, 0, 0).unwrap();
        tx
    }

    fn completed_tx(user_id: Uuid, amount: i64, recipient: Option<&str>) -> Transaction {
        let mut tx = business_hours_tx(user_id, amount, recipient);
        tx.status = TransactionStatus::Completed;
        tx
    }

    #[test]
    fn test_brand_new_user_restricted_not_denied() {
        // Account age 0, no history, no verifications, $40 request:
        // amount factor 80 against the $50 Basic limit pushes risk past 50
        let engine = engine();
        let user = profile(0.0, 0, 0, 0, 0);
        let tx = business_hours_tx(user.user_id, 40, None);

        let verdict = engine.evaluate(&tx, &user, &[]);

        assert!(verdict.allowed);
        assert!(verdict.risk_score > 50.0, "got {}", verdict.risk_score);
        let restrictions = verdict.restrictions.expect("restrictions expected");
        assert_eq!(restrictions.max_amount, Some(Decimal::from(25)));
    }

    #[test]
    fn test_established_user_unrestricted() {
        // Score 80, 20/20 completed, known recipient, business hours:
        // everything low, 40% reputation discount lands well under 50
        let engine = engine();
        let user = profile(80.0, 20, 20, 3, 120);
        let recent: Vec<_> = (0..5)
            .map(|_| completed_tx(user.user_id, 50, Some("grocer")))
            .collect();
        let tx = business_hours_tx(user.user_id, 55, Some("grocer"));

        let verdict = engine.evaluate(&tx, &user, &recent);

        assert!(verdict.allowed);
        assert!(verdict.risk_score < 50.0, "got {}", verdict.risk_score);
        assert!(verdict.restrictions.is_none());
    }

    #[test]
    fn test_over_limit_amount_capped_even_at_low_risk() {
        let engine = engine();
        // High score, long history: low risk, but the request exceeds the limit
        let user = profile(90.0, 30, 30, 3, 200);
        let recent: Vec<_> = (0..5)
            .map(|_| completed_tx(user.user_id, 4_000, Some("payee")))
            .collect();
        // Full tier at 1.9x: single limit 4750
        let tx = business_hours_tx(user.user_id, 4_900, Some("payee"));

        let verdict = engine.evaluate(&tx, &user, &recent);

        assert!(verdict.risk_score < 50.0);
        let restrictions = verdict.restrictions.expect("cap expected");
        assert_eq!(restrictions.max_amount, Some(Decimal::from(4_750)));
        assert!(!restrictions.require_verification);
    }

    #[test]
    fn test_anomalous_amount_raises_pattern_factor() {
        let engine = engine();
        let user = profile(20.0, 6, 8, 0, 10);
        let recent: Vec<_> = (0..6)
            .map(|_| completed_tx(user.user_id, 10, Some("shop")))
            .collect();
        // 40 > 3x the $10 mean
        let tx = business_hours_tx(user.user_id, 40, Some("shop"));

        let verdict = engine.evaluate(&tx, &user, &recent);
        let pattern = verdict
            .factors
            .iter()
            .find(|f| f.name == "amount_pattern")
            .unwrap();
        assert_eq!(pattern.score, 70.0);
    }

    #[test]
    fn test_off_hours_scores_higher() {
        let engine = engine();
        let user = profile(50.0, 10, 12, 1, 45);

        let mut day_tx = business_hours_tx(user.user_id, 100, None);
        day_tx.created_at = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        let mut night_tx = business_hours_tx(user.user_id, 100, None);
        night_tx.created_at = Utc.with_ymd_and_hms(2026, 3, 4, 2, 0, 0).unwrap();

        let day = engine.evaluate(&day_tx, &user, &[]);
        let night = engine.evaluate(&night_tx, &user, &[]);
        assert!(night.risk_score > day.risk_score);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn final_risk_always_clamped_and_allowed(
                amount in 1i64..1_000_000,
                score in 0.0f64..100.0,
                positive in 0u32..100,
                extra in 0u32..100,
                hour in 0u32..24,
            ) {
                let engine = engine();
                let mut user = profile(score, positive, positive + extra, 1, 15);
                user.score = score;
                let mut tx = Transaction::new(user.user_id, Decimal::from(amount), None);
                tx.created_at = Utc.with_ymd_and_hms(2026, 3, 4, hour, 0, 0).unwrap();

                let verdict = engine.evaluate(&tx, &user, &[]);

                prop_assert!(verdict.allowed);
                prop_assert!((RISK_SCORE_MIN..=RISK_SCORE_MAX).contains(&verdict.risk_score));
            }
        }
    }
}
