//! Core types shared across the decision pipeline

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-user trust profile: reputation score plus the counters it is
/// recomputed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustProfile {
    /// User ID
    pub user_id: Uuid,

    /// Transactions that resolved positively (completed)
    pub positive_transactions: u32,

    /// All resolved transactions
    pub total_transactions: u32,

    /// Successful identity/payment verifications on record
    pub verification_count: u32,

    /// Account creation time; age is derived from this on read
    pub created_at: DateTime<Utc>,

    /// Reputation score (0-100), recomputed on every mutation and read
    pub score: f64,
}

impl TrustProfile {
    /// Create a fresh profile for a newly onboarded user
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            positive_transactions: 0,
            total_transactions: 0,
            verification_count: 0,
            created_at: Utc::now(),
            score: 0.0,
        }
    }

    /// Account age in whole days, derived from the creation timestamp
    pub fn account_age_days(&self) -> i64 {
        self.account_age_days_at(Utc::now())
    }

    /// Account age in whole days as of `now` (deterministic for tests)
    pub fn account_age_days_at(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days().max(0)
    }

    /// Historical success ratio (1.0 for users with no history)
    pub fn success_ratio(&self) -> f64 {
        if self.total_transactions == 0 {
            1.0
        } else {
            f64::from(self.positive_transactions) / f64::from(self.total_transactions)
        }
    }
}

/// Transaction lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Created, not yet resolved
    Pending,
    /// Settled successfully
    Completed,
    /// Failed to settle
    Failed,
    /// Held back as suspected fraud
    Flagged,
}

impl TransactionStatus {
    /// Terminal statuses never transition again
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

/// A financial transaction. Amount and recipient are immutable; status and
/// risk score mutate at most a few times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID
    pub id: Uuid,

    /// Initiating user
    pub user_id: Uuid,

    /// Requested amount (positive)
    pub amount: Decimal,

    /// Recipient identifier, if any
    pub recipient: Option<String>,

    /// Lifecycle status
    pub status: TransactionStatus,

    /// Assessed risk score, absent until evaluated
    pub risk_score: Option<f64>,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Last status change
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new pending transaction
    pub fn new(user_id: Uuid, amount: Decimal, recipient: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            amount,
            recipient,
            status: TransactionStatus::Pending,
            risk_score: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Age of the transaction in whole days as of `now`
    pub fn age_days_at(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days().max(0)
    }
}

/// Single/daily/monthly limit triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitTriple {
    /// Single transaction limit
    pub single: Decimal,

    /// Daily limit
    pub daily: Decimal,

    /// Monthly limit
    pub monthly: Decimal,
}

impl LimitTriple {
    /// Build a triple from whole-dollar values
    pub fn from_dollars(single: i64, daily: i64, monthly: i64) -> Self {
        Self {
            single: Decimal::from(single),
            daily: Decimal::from(daily),
            monthly: Decimal::from(monthly),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_account_age_never_negative() {
        let mut profile = TrustProfile::new(Uuid::new_v4());
        // Clock skew: creation in the future must not yield negative age
        profile.created_at = Utc::now() + Duration::days(2);
        assert_eq!(profile.account_age_days(), 0);
    }

    #[test]
    fn test_success_ratio_empty_history() {
        let profile = TrustProfile::new(Uuid::new_v4());
        assert_eq!(profile.success_ratio(), 1.0);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Pending).unwrap(),
            "\"pending\""
        );
        let status: TransactionStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, TransactionStatus::Completed);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Completed.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
        assert!(TransactionStatus::Flagged.is_terminal());
    }
}
