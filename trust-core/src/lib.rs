//! TrustRail Trust Core
//!
//! Per-user trust profiles and the reputation scoring formula that the rest
//! of the decision pipeline consumes.
//!
//! # Invariants
//!
//! - Reputation score stays within [0, 100] by construction: the three
//!   components are individually capped (transactions 50, verifications 25,
//!   account age 25)
//! - `positive_transactions <= total_transactions` at all times
//! - Profile mutation is serialized per user: concurrent recomputes for the
//!   same user never lose counter updates

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod error;
pub mod store;
pub mod tier;
pub mod tracker;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use store::{HistorySupplier, ProfileStore, TransactionStore, UserHistory};
pub use tier::{AccessTier, ThresholdTierPolicy, TierConfig, TierPolicy};
pub use tracker::TrustProfileTracker;
pub use types::{LimitTriple, Transaction, TransactionStatus, TrustProfile};
