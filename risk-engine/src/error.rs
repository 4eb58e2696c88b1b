//! Error types for the risk engine

use thiserror::Error;

/// Result type for risk engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Risk engine errors
#[derive(Error, Debug)]
pub enum Error {
    /// Factor weights do not form a valid distribution
    #[error("Invalid factor weights: {0}")]
    InvalidWeights(String),

    /// Trust core failure (missing profile, storage)
    #[error(transparent)]
    Trust(#[from] trust_core::Error),

    /// Storage collaborator failure
    #[error("Storage error: {0}")]
    Storage(String),
}
