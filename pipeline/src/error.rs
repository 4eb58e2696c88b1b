//! Error types for the decision pipeline

use thiserror::Error;
use uuid::Uuid;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors: typed not-found failures plus whatever the component
/// engines surface. Degraded storage propagates; the pipeline never retries.
#[derive(Error, Debug)]
pub enum Error {
    /// Transaction not found
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    /// Trust core failure
    #[error(transparent)]
    Trust(#[from] trust_core::Error),

    /// Risk engine failure
    #[error(transparent)]
    Risk(#[from] risk_engine::Error),

    /// Fraud engine failure
    #[error(transparent)]
    Fraud(#[from] fraud_engine::Error),

    /// Coverage failure
    #[error(transparent)]
    Coverage(#[from] coverage::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
