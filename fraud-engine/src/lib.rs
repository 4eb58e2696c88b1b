//! TrustRail Fraud Heuristic Engine
//!
//! Deterministic rule-based fraud probability with inclusion-biased
//! adjustments. A second opinion alongside the risk engine, never a
//! refinement of it: the two run independently and the caller merges the
//! verdicts.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod engine;
pub mod error;
pub mod types;

pub use config::FraudConfig;
pub use engine::FraudHeuristicEngine;
pub use error::{Error, Result};
pub use types::{FraudAction, FraudLimits, FraudVerdict};
