//! TrustRail Coverage Underwriter
//!
//! Insurance-like protection for completed transactions: eligibility,
//! coverage limits, premium pricing, and the claim lifecycle
//! (file → validate → settle).

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod claims;
pub mod config;
pub mod error;
pub mod store;
pub mod types;
pub mod underwriter;

pub use claims::ClaimProcessor;
pub use config::CoverageConfig;
pub use error::{Error, Result};
pub use store::ClaimStore;
pub use types::{Claim, ClaimResult, ClaimStatus, CoverageDecision, Settlement};
pub use underwriter::CoverageUnderwriter;
