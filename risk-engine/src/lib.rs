//! TrustRail Risk Engine
//!
//! Multi-factor transaction risk assessment with a restriction-only
//! decision policy: every verdict allows the transaction, and risk is
//! mitigated through amount caps, settlement delays, and verification
//! requirements rather than denial.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod error;
pub mod limits;
pub mod scoring;
pub mod store;
pub mod types;

pub use config::FactorWeights;
pub use error::{Error, Result};
pub use limits::TransactionLimitPolicy;
pub use scoring::RiskEngine;
pub use store::VerdictStore;
pub use types::{FactorScore, Restrictions, RiskVerdict};
