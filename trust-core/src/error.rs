//! Error types for the trust core

use thiserror::Error;
use uuid::Uuid;

/// Result type for trust core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trust core errors
#[derive(Error, Debug)]
pub enum Error {
    /// No trust profile exists for the user
    #[error("Trust profile not found for user: {0}")]
    ProfileNotFound(Uuid),

    /// Transaction not found
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    /// Storage collaborator failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid profile state (counter invariant broken)
    #[error("Invalid profile state: {0}")]
    InvalidProfile(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
