//! Storage collaborator traits
//!
//! The pipeline never owns persistence: every engine calls through these
//! object-safe traits, and the backing implementation (in-memory, SQL, KV)
//! is injected by the host. Calls are assumed independently atomic per
//! entity; nothing here assumes cross-entity transactions.

use crate::error::Result;
use crate::types::{Transaction, TransactionStatus, TrustProfile};
use uuid::Uuid;

/// Trust profile persistence
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile, `None` when the user has none yet
    fn get_profile(&self, user_id: Uuid) -> Result<Option<TrustProfile>>;

    /// Insert or replace a profile
    fn put_profile(&self, profile: TrustProfile) -> Result<()>;
}

/// Transaction persistence
pub trait TransactionStore: Send + Sync {
    /// Fetch a transaction by ID
    fn get_transaction(&self, transaction_id: Uuid) -> Result<Option<Transaction>>;

    /// Insert a new transaction
    fn put_transaction(&self, transaction: Transaction) -> Result<()>;

    /// Update status (and bump `updated_at`) for a transaction
    fn update_status(&self, transaction_id: Uuid, status: TransactionStatus) -> Result<()>;

    /// Record the assessed risk score on a transaction
    fn update_risk_score(&self, transaction_id: Uuid, risk_score: f64) -> Result<()>;

    /// Most recent transactions for a user, newest first, up to `limit`
    fn recent_for_user(&self, user_id: Uuid, limit: usize) -> Result<Vec<Transaction>>;
}

/// Ordered view of a user's history, as supplied to the fraud engine
#[derive(Debug, Clone)]
pub struct UserHistory {
    /// Account age in whole days
    pub account_age_days: i64,

    /// Recent transactions, newest first
    pub transactions: Vec<Transaction>,

    /// Successful verifications on record
    pub verification_count: u32,

    /// Whether any verification ever succeeded
    pub has_verified: bool,
}

impl UserHistory {
    /// Completed transactions out of all resolved ones (1.0 with no history)
    pub fn success_ratio(&self) -> f64 {
        let resolved: Vec<_> = self
            .transactions
            .iter()
            .filter(|tx| tx.status.is_terminal())
            .collect();
        if resolved.is_empty() {
            return 1.0;
        }
        let completed = resolved
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Completed)
            .count();
        completed as f64 / resolved.len() as f64
    }
}

/// Supplies the per-user history view consumed by fraud analysis. May be
/// backed by the same storage as [`TransactionStore`].
pub trait HistorySupplier: Send + Sync {
    /// Build the history view for a user
    fn history_for(&self, user_id: Uuid) -> Result<UserHistory>;
}
