//! TrustRail Decision Pipeline
//!
//! Wires the trust tracker, risk engine, fraud engine, and coverage
//! underwriter behind one facade for the routing layer. Every collaborator
//! is injected; nothing in here is a global.
//!
//! A transaction flows through two independent assessments (risk and
//! fraud), the caller merges them into a final status, completed
//! transactions may be underwritten for coverage, and claims settle against
//! that coverage later.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod engine;
pub mod error;
pub mod memory;

pub use config::Config;
pub use engine::DecisionPipeline;
pub use error::{Error, Result};
pub use memory::MemoryBackend;
