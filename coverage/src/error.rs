//! Error types for coverage and claims

use thiserror::Error;
use uuid::Uuid;

/// Result type for coverage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coverage errors. Claim validation failures are not errors: they come
/// back as structured [`ClaimResult::Rejected`](crate::ClaimResult)
/// values with a reason.
#[derive(Error, Debug)]
pub enum Error {
    /// Claim not found
    #[error("Claim not found: {0}")]
    ClaimNotFound(Uuid),

    /// A claim already exists for the transaction (storage-level unique
    /// constraint)
    #[error("Claim already exists for transaction: {0}")]
    DuplicateClaim(Uuid),

    /// Trust core failure (missing profile, storage)
    #[error(transparent)]
    Trust(#[from] trust_core::Error),

    /// Storage collaborator failure
    #[error("Storage error: {0}")]
    Storage(String),
}
