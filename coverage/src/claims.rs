//! Claim lifecycle: file, validate, settle
//!
//! Validation failures come back as structured rejections with a reason;
//! only missing records and storage failures are errors. Settlement pays
//! `min(claim, coverage limit)` scaled by reputation (50% at score 0 up to
//! 100% at score 100), rounded to cents. Approval refreshes the claimant's
//! reputation score but moves no counters: claims are a safety net, not a
//! reward signal.

use crate::error::{Error, Result};
use crate::store::ClaimStore;
use crate::types::{Claim, ClaimResult, ClaimStatus, CoverageDecision, Settlement};
use crate::underwriter::CoverageUnderwriter;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};
use trust_core::{Transaction, TransactionStatus, TrustProfile, TrustProfileTracker};
use uuid::Uuid;

/// Validates and settles claims against covered transactions
pub struct ClaimProcessor {
    underwriter: CoverageUnderwriter,
    claims: Arc<dyn ClaimStore>,
    tracker: Arc<TrustProfileTracker>,
}

impl ClaimProcessor {
    /// Create a processor
    pub fn new(
        underwriter: CoverageUnderwriter,
        claims: Arc<dyn ClaimStore>,
        tracker: Arc<TrustProfileTracker>,
    ) -> Self {
        Self {
            underwriter,
            claims,
            tracker,
        }
    }

    /// File a claim against a transaction and resolve it
    pub fn file_claim(
        &self,
        transaction: &Transaction,
        profile: &TrustProfile,
        amount: Decimal,
    ) -> Result<ClaimResult> {
        self.file_claim_at(transaction, profile, amount, Utc::now())
    }

    /// File a claim as of `now` (deterministic for tests)
    pub fn file_claim_at(
        &self,
        transaction: &Transaction,
        profile: &TrustProfile,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<ClaimResult> {
        if let Some(reason) = self.validate(transaction, amount, now)? {
            return Ok(ClaimResult::Rejected { reason });
        }

        let limit = match self.underwriter.evaluate_at(transaction, profile, now) {
            CoverageDecision::Covered { limit, .. } => limit,
            CoverageDecision::NotCovered { reason } => {
                return Ok(ClaimResult::Rejected {
                    reason: format!("transaction not covered: {reason}"),
                });
            }
        };

        let mut claim = Claim::new(transaction.id, transaction.user_id, amount);

        // The store holds the unique constraint; a concurrent filer losing
        // this race gets the same rejection as a sequential duplicate
        match self.claims.insert_claim(claim.clone()) {
            Ok(()) => {}
            Err(Error::DuplicateClaim(_)) => {
                return Ok(ClaimResult::Rejected {
                    reason: "a claim already exists for this transaction".to_string(),
                });
            }
            Err(err) => return Err(err),
        }

        let settlement = self.settle(&mut claim, limit, profile.score, now);
        self.claims.update_claim(claim.clone())?;

        // Refresh reputation; failure here must not unwind a settled claim
        if let Err(err) = self.tracker.apply_claim_resolution(claim.user_id) {
            warn!(user_id = %claim.user_id, %err, "reputation refresh after claim failed");
        }

        info!(
            claim_id = %claim.id,
            transaction_id = %claim.transaction_id,
            settlement_amount = %settlement.amount,
            "claim approved and settled"
        );

        Ok(ClaimResult::Approved { claim, settlement })
    }

    /// Look up a claim by ID
    pub fn claim(&self, claim_id: Uuid) -> Result<Claim> {
        self.claims
            .get_claim(claim_id)?
            .ok_or(Error::ClaimNotFound(claim_id))
    }

    // Returns the rejection reason, or None when the claim is valid
    fn validate(
        &self,
        transaction: &Transaction,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Option<String>> {
        let config = self.underwriter.config();

        if transaction.status != TransactionStatus::Completed {
            return Ok(Some("transaction is not completed".to_string()));
        }

        if amount > transaction.amount * config.max_claim_multiple {
            return Ok(Some(format!(
                "claimed amount {amount} exceeds {}x the transaction amount",
                config.max_claim_multiple
            )));
        }

        if transaction.age_days_at(now) > config.claim_window_days {
            return Ok(Some("transaction too old".to_string()));
        }

        if self
            .claims
            .claim_for_transaction(transaction.id)?
            .is_some()
        {
            return Ok(Some(
                "a claim already exists for this transaction".to_string(),
            ));
        }

        Ok(None)
    }

    fn settle(
        &self,
        claim: &mut Claim,
        coverage_limit: Decimal,
        score: f64,
        now: DateTime<Utc>,
    ) -> Settlement {
        let multiplier = 0.5 + (score / 100.0).clamp(0.0, 1.0) * 0.5;
        let multiplier = Decimal::try_from(multiplier).unwrap_or(Decimal::new(5, 1));

        let payable = claim.amount.min(coverage_limit);
        let amount = (payable * multiplier).round_dp(2);

        claim.status = ClaimStatus::Approved;
        claim.settlement_amount = Some(amount);
        claim.resolved_at = Some(now);

        Settlement {
            id: Uuid::new_v4(),
            claim_id: claim.id,
            amount,
            settled_at: now,
            notes: format!(
                "payable {payable} within coverage limit {coverage_limit}, score multiplier {multiplier}"
            ),
        }
    }
}
