//! Core types for coverage and claims

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coverage decision for a completed transaction. Recomputed if
/// re-evaluated; never stored as mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum CoverageDecision {
    /// The transaction is covered
    Covered {
        /// Maximum amount a claim can settle for
        limit: Decimal,
        /// Premium charged for the coverage
        premium: Decimal,
    },
    /// The transaction is not covered
    NotCovered {
        /// The specific eligibility failure
        reason: String,
    },
}

impl CoverageDecision {
    /// Whether coverage was granted
    pub fn is_covered(&self) -> bool {
        matches!(self, CoverageDecision::Covered { .. })
    }
}

/// Claim lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Filed, not yet resolved
    Pending,
    /// Validated and settled
    Approved,
    /// Failed validation
    Rejected,
}

/// A claim against exactly one covered transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Claim ID
    pub id: Uuid,

    /// The transaction claimed against (at most one claim per transaction)
    pub transaction_id: Uuid,

    /// Claiming user
    pub user_id: Uuid,

    /// Requested amount
    pub amount: Decimal,

    /// Lifecycle status
    pub status: ClaimStatus,

    /// Settled amount, absent until resolved
    pub settlement_amount: Option<Decimal>,

    /// Filing time
    pub filed_at: DateTime<Utc>,

    /// Resolution time, absent until resolved
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Claim {
    /// Create a pending claim
    pub fn new(transaction_id: Uuid, user_id: Uuid, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_id,
            user_id,
            amount,
            status: ClaimStatus::Pending,
            settlement_amount: None,
            filed_at: Utc::now(),
            resolved_at: None,
        }
    }
}

/// Monetary resolution of an approved claim; owned by the claim it resolves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    /// Settlement ID
    pub id: Uuid,

    /// The claim resolved
    pub claim_id: Uuid,

    /// Amount paid out, rounded to two decimal places
    pub amount: Decimal,

    /// Settlement time
    pub settled_at: DateTime<Utc>,

    /// Free-text notes (coverage limit applied, score multiplier)
    pub notes: String,
}

/// Outcome of filing a claim
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ClaimResult {
    /// Claim approved and settled
    Approved {
        /// The resolved claim
        claim: Claim,
        /// Its settlement
        settlement: Settlement,
    },
    /// Claim rejected with a specific reason
    Rejected {
        /// Why validation failed
        reason: String,
    },
}
