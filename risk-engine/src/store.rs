//! Verdict persistence trait

use crate::error::Result;
use crate::types::RiskVerdict;
use uuid::Uuid;

/// Risk verdict persistence. One verdict per transaction, immutable once
/// recorded.
pub trait VerdictStore: Send + Sync {
    /// Record a verdict
    fn put_verdict(&self, verdict: RiskVerdict) -> Result<()>;

    /// Look up the verdict for a transaction
    fn get_verdict(&self, transaction_id: Uuid) -> Result<Option<RiskVerdict>>;
}
