//! Additive fraud probability heuristics
//!
//! Probability starts at 0.1 and accumulates from amount anomaly, account
//! age, history depth, and success ratio, clamped to 0.95. Two
//! inclusion-biased discounts then lower it (never raise it): small
//! transactions from newly onboarded users, and users on an improving
//! trend. The result thresholds into an action; blocking is reserved for
//! high-probability users with no successful verification to fall back on.

use crate::config::FraudConfig;
use crate::types::{FraudAction, FraudLimits, FraudVerdict, PROBABILITY_BASE, PROBABILITY_MAX};
use rust_decimal::Decimal;
use tracing::{debug, info};
use trust_core::{Transaction, UserHistory};

/// Surcharge when the amount exceeds 3x the recent mean
const AMOUNT_ANOMALY_SURCHARGE: f64 = 0.3;
/// Surcharge for accounts younger than the very-new cutoff
const VERY_NEW_ACCOUNT_SURCHARGE: f64 = 0.2;
/// Surcharge for accounts younger than the new cutoff
const NEW_ACCOUNT_SURCHARGE: f64 = 0.1;
/// Surcharge for a first transaction
const FIRST_TRANSACTION_SURCHARGE: f64 = 0.2;
/// Surcharge for users with fewer than five transactions
const THIN_HISTORY_SURCHARGE: f64 = 0.1;
/// Surcharge for a poor success ratio over more than three transactions
const POOR_HISTORY_SURCHARGE: f64 = 0.25;

/// Discount multiplier for small transactions from new users
const NEW_USER_SMALL_AMOUNT_DISCOUNT: f64 = 0.7;
/// Discount multiplier for an improving trend
const IMPROVING_TREND_DISCOUNT: f64 = 0.8;

/// Rule-based fraud probability engine
pub struct FraudHeuristicEngine {
    config: FraudConfig,
}

impl Default for FraudHeuristicEngine {
    fn default() -> Self {
        Self::new(FraudConfig::default())
    }
}

impl FraudHeuristicEngine {
    /// Create an engine from config
    pub fn new(config: FraudConfig) -> Self {
        Self { config }
    }

    /// Analyze a transaction against the user's supplied history
    pub fn analyze(&self, transaction: &Transaction, history: &UserHistory) -> FraudVerdict {
        let mut probability = PROBABILITY_BASE;
        let mut signals: Vec<String> = Vec::new();

        if let Some(mean) = recent_mean(history) {
            if mean > Decimal::ZERO && transaction.amount > mean * Decimal::from(3) {
                probability += AMOUNT_ANOMALY_SURCHARGE;
                signals.push(format!(
                    "amount {} exceeds 3x recent mean {mean}",
                    transaction.amount
                ));
            }
        }

        if history.account_age_days < self.config.very_new_account_days {
            probability += VERY_NEW_ACCOUNT_SURCHARGE;
            signals.push(format!(
                "account {} days old",
                history.account_age_days
            ));
        } else if history.account_age_days < self.config.new_account_days {
            probability += NEW_ACCOUNT_SURCHARGE;
            signals.push(format!(
                "account {} days old",
                history.account_age_days
            ));
        }

        let count = history.transactions.len();
        if count == 0 {
            probability += FIRST_TRANSACTION_SURCHARGE;
            signals.push("first transaction".to_string());
        } else if count < 5 {
            probability += THIN_HISTORY_SURCHARGE;
            signals.push(format!("only {count} prior transactions"));
        }

        let success_ratio = history.success_ratio();
        if success_ratio < self.config.poor_history_ratio && count > 3 {
            probability += POOR_HISTORY_SURCHARGE;
            signals.push(format!("success ratio {success_ratio:.2}"));
        }

        probability = probability.min(PROBABILITY_MAX);

        // Inclusion adjustments: small, cautious transactions by the newly
        // onboarded should not be penalized for being new
        if history.account_age_days < self.config.new_account_days
            && transaction.amount < self.config.small_transaction_threshold
        {
            probability *= NEW_USER_SMALL_AMOUNT_DISCOUNT;
            signals.push("small transaction from new account".to_string());
        }
        if has_improving_trend(history) {
            probability *= IMPROVING_TREND_DISCOUNT;
            signals.push("improving trend".to_string());
        }

        let action = self.action_for(probability, history);
        let reason = if matches!(action, FraudAction::Allow) && signals.is_empty() {
            None
        } else {
            Some(signals.join("; "))
        };

        if matches!(action, FraudAction::Block) {
            info!(
                transaction_id = %transaction.id,
                user_id = %transaction.user_id,
                probability,
                "fraud analysis blocked transaction"
            );
        } else {
            debug!(
                transaction_id = %transaction.id,
                probability,
                ?action,
                "fraud analysis complete"
            );
        }

        FraudVerdict {
            transaction_id: transaction.id,
            probability,
            action,
            reason,
        }
    }

    fn action_for(&self, probability: f64, history: &UserHistory) -> FraudAction {
        if probability > self.config.verification_threshold {
            // Verified users get a path forward; only the unverifiable are blocked
            return if history.has_verified {
                FraudAction::AdditionalVerification
            } else {
                FraudAction::Block
            };
        }

        if probability > self.config.limit_threshold {
            return FraudAction::ApplyLimits {
                limits: self.computed_limits(probability, history),
            };
        }

        FraudAction::Allow
    }

    // Cap tiered by transaction count, scaled down for young accounts, and
    // shrunk further as probability climbs through the limits band.
    fn computed_limits(&self, probability: f64, history: &UserHistory) -> FraudLimits {
        let base = match history.transactions.len() {
            0 => self.config.cap_no_history,
            1..=4 => self.config.cap_under_five,
            5..=19 => self.config.cap_under_twenty,
            _ => self.config.cap_established,
        };

        let age_multiplier = if history.account_age_days < self.config.very_new_account_days {
            0.5
        } else if history.account_age_days < self.config.new_account_days {
            0.75
        } else {
            1.0
        };

        let reduction = (1.0 - (probability - self.config.limit_threshold) * 2.0).max(0.1);

        let scale = Decimal::try_from(age_multiplier * reduction).unwrap_or(Decimal::ONE);
        FraudLimits {
            max_amount: (base * scale).round_dp(2),
            delay_settlement: probability > self.config.delay_threshold,
            require_verification: probability > self.config.extra_verification_threshold,
        }
    }
}

fn recent_mean(history: &UserHistory) -> Option<Decimal> {
    if history.transactions.is_empty() {
        return None;
    }
    let total: Decimal = history.transactions.iter().map(|tx| tx.amount).sum();
    Some(total / Decimal::from(history.transactions.len() as u32))
}

// Improving trend: the success ratio over the five most recent transactions
// strictly exceeds the all-history ratio, with at least three on record.
fn has_improving_trend(history: &UserHistory) -> bool {
    if history.transactions.len() < 3 {
        return false;
    }
    let recent = UserHistory {
        account_age_days: history.account_age_days,
        transactions: history.transactions.iter().take(5).cloned().collect(),
        verification_count: history.verification_count,
        has_verified: history.has_verified,
    };
    recent.success_ratio() > history.success_ratio()
}
