//! Trust profile tracking and the reputation scoring formula
//!
//! Score = transaction component (≤50) + verification component (≤25) +
//! age component (≤25). The score is recomputed from the stored counters on
//! every mutation and on every read; account age always derives from the
//! creation timestamp, so no background job is needed to keep it current.
//!
//! Profile mutation is a read-modify-write against the store, so concurrent
//! transactions for the same user would lose counter updates without
//! serialization. A per-user lock registry guards every mutation; cross-user
//! operations stay fully parallel.

use crate::error::{Error, Result};
use crate::store::ProfileStore;
use crate::types::TrustProfile;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Maximum contribution of the positive-transaction ratio
const TRANSACTION_COMPONENT_MAX: f64 = 50.0;
/// Points per successful verification
const VERIFICATION_POINTS: f64 = 12.5;
/// Maximum contribution of verifications
const VERIFICATION_COMPONENT_MAX: f64 = 25.0;
/// Days of account age worth the full age component
const AGE_FULL_CREDIT_DAYS: f64 = 30.0;
/// Maximum contribution of account age
const AGE_COMPONENT_MAX: f64 = 25.0;

/// Computes and maintains per-user trust profiles
pub struct TrustProfileTracker {
    profiles: Arc<dyn ProfileStore>,
    // Per-user write locks; cross-user mutations never contend
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl TrustProfileTracker {
    /// Create a tracker over a profile store
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            profiles,
            locks: DashMap::new(),
        }
    }

    /// Compute the reputation score for a profile as of `now`
    pub fn compute_score(profile: &TrustProfile, now: DateTime<Utc>) -> f64 {
        let transaction_component = if profile.total_transactions > 0 {
            profile.success_ratio() * TRANSACTION_COMPONENT_MAX
        } else {
            0.0
        };

        let verification_component =
            (f64::from(profile.verification_count) * VERIFICATION_POINTS)
                .min(VERIFICATION_COMPONENT_MAX);

        let age_days = profile.account_age_days_at(now) as f64;
        let age_component =
            (age_days / AGE_FULL_CREDIT_DAYS * AGE_COMPONENT_MAX).min(AGE_COMPONENT_MAX);

        transaction_component + verification_component + age_component
    }

    /// Current profile with a freshly recomputed score.
    ///
    /// Unlike the `apply_*` side effects, a missing profile here is a typed
    /// failure: callers asking for a score need one to exist.
    pub fn score(&self, user_id: Uuid) -> Result<TrustProfile> {
        let mut profile = self
            .profiles
            .get_profile(user_id)?
            .ok_or(Error::ProfileNotFound(user_id))?;
        profile.score = Self::compute_score(&profile, Utc::now());
        Ok(profile)
    }

    /// Register a new user with an empty profile
    pub fn register(&self, user_id: Uuid) -> Result<TrustProfile> {
        let profile = TrustProfile::new(user_id);
        self.profiles.put_profile(profile.clone())?;
        Ok(profile)
    }

    /// Record a successful verification and recompute the score
    pub fn apply_verification(&self, user_id: Uuid) -> Result<()> {
        self.mutate(user_id, "verification", |profile| {
            profile.verification_count += 1;
        })
    }

    /// Record a resolved transaction and recompute the score
    pub fn apply_transaction_outcome(&self, user_id: Uuid, was_positive: bool) -> Result<()> {
        self.mutate(user_id, "transaction outcome", |profile| {
            profile.total_transactions += 1;
            if was_positive {
                profile.positive_transactions += 1;
            }
        })
    }

    /// Recompute after a claim resolves. Claims are a safety net, not a
    /// reward signal: no counter moves, the score is only refreshed.
    pub fn apply_claim_resolution(&self, user_id: Uuid) -> Result<()> {
        self.mutate(user_id, "claim resolution", |_profile| {})
    }

    // Serialized read-modify-write for one user. A missing profile degrades
    // to a logged no-op so reputation upkeep never aborts the caller's flow.
    fn mutate<F>(&self, user_id: Uuid, trigger: &str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut TrustProfile),
    {
        let lock = self
            .locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock();

        let mut profile = match self.profiles.get_profile(user_id)? {
            Some(profile) => profile,
            None => {
                warn!(%user_id, trigger, "reputation recompute skipped: profile missing");
                return Ok(());
            }
        };

        apply(&mut profile);
        if profile.positive_transactions > profile.total_transactions {
            return Err(Error::InvalidProfile(format!(
                "positive {} exceeds total {}",
                profile.positive_transactions, profile.total_transactions
            )));
        }

        profile.score = Self::compute_score(&profile, Utc::now());
        debug!(%user_id, trigger, score = profile.score, "reputation recomputed");
        self.profiles.put_profile(profile)
    }
}
