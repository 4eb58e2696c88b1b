//! Claim persistence trait

use crate::error::Result;
use crate::types::Claim;
use uuid::Uuid;

/// Claim persistence.
///
/// `insert_claim` must enforce claim uniqueness per transaction atomically
/// (unique constraint on the transaction id), returning
/// [`Error::DuplicateClaim`](crate::Error::DuplicateClaim) on conflict.
/// Application-level pre-checks are advisory only; under concurrency the
/// store is the arbiter.
pub trait ClaimStore: Send + Sync {
    /// Insert a new claim; fails atomically if the transaction already has one
    fn insert_claim(&self, claim: Claim) -> Result<()>;

    /// Fetch a claim by ID
    fn get_claim(&self, claim_id: Uuid) -> Result<Option<Claim>>;

    /// Fetch the claim filed against a transaction, if any
    fn claim_for_transaction(&self, transaction_id: Uuid) -> Result<Option<Claim>>;

    /// Replace a claim (status/settlement updates)
    fn update_claim(&self, claim: Claim) -> Result<()>;
}
