//! Error types for the fraud engine

use thiserror::Error;

/// Result type for fraud engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fraud engine errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Trust core failure (missing history, storage)
    #[error(transparent)]
    Trust(#[from] trust_core::Error),
}
