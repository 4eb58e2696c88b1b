//! The decision pipeline facade
//!
//! Risk and fraud assessments run independently; the caller (or
//! [`DecisionPipeline::final_status`]) merges the two verdicts into the
//! transaction's final status. Completed transactions may then be
//! underwritten, and claims settle against that coverage.

use crate::config::Config;
use crate::error::{Error, Result};
use coverage::{ClaimProcessor, ClaimResult, ClaimStore, CoverageDecision, CoverageUnderwriter};
use fraud_engine::{FraudAction, FraudHeuristicEngine, FraudVerdict};
use risk_engine::{RiskEngine, RiskVerdict, TransactionLimitPolicy, VerdictStore};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;
use trust_core::{
    HistorySupplier, LimitTriple, ProfileStore, ThresholdTierPolicy, TierPolicy, Transaction,
    TransactionStatus, TransactionStore, TrustProfile, TrustProfileTracker,
};
use uuid::Uuid;

/// How many prior transactions feed the risk factors
const RISK_HISTORY_WINDOW: usize = 25;

/// Facade over the four decision components, with all collaborators
/// injected
pub struct DecisionPipeline {
    tracker: Arc<TrustProfileTracker>,
    transactions: Arc<dyn TransactionStore>,
    history: Arc<dyn HistorySupplier>,
    verdicts: Arc<dyn VerdictStore>,
    limits: TransactionLimitPolicy,
    risk: RiskEngine,
    fraud: FraudHeuristicEngine,
    underwriter: CoverageUnderwriter,
    claims: ClaimProcessor,
}

impl DecisionPipeline {
    /// Wire a pipeline from config and storage collaborators
    pub fn new(
        config: Config,
        profiles: Arc<dyn ProfileStore>,
        transactions: Arc<dyn TransactionStore>,
        history: Arc<dyn HistorySupplier>,
        verdicts: Arc<dyn VerdictStore>,
        claim_store: Arc<dyn ClaimStore>,
    ) -> Result<Self> {
        let tier_policy: Arc<dyn TierPolicy> =
            Arc::new(ThresholdTierPolicy::new(config.tiers.clone()));
        let tracker = Arc::new(TrustProfileTracker::new(profiles));

        let risk = RiskEngine::new(
            config.weights,
            TransactionLimitPolicy::new(Arc::clone(&tier_policy)),
        )?;
        let claims = ClaimProcessor::new(
            CoverageUnderwriter::new(config.coverage.clone()),
            claim_store,
            Arc::clone(&tracker),
        );

        Ok(Self {
            tracker,
            transactions,
            history,
            verdicts,
            limits: TransactionLimitPolicy::new(tier_policy),
            risk,
            fraud: FraudHeuristicEngine::new(config.fraud),
            underwriter: CoverageUnderwriter::new(config.coverage),
            claims,
        })
    }

    /// The shared trust profile tracker
    pub fn tracker(&self) -> &Arc<TrustProfileTracker> {
        &self.tracker
    }

    /// Onboard a user with an empty profile
    pub fn register_user(&self, user_id: Uuid) -> Result<TrustProfile> {
        Ok(self.tracker.register(user_id)?)
    }

    /// Record a successful external verification for a user
    pub fn record_verification(&self, user_id: Uuid) -> Result<()> {
        Ok(self.tracker.apply_verification(user_id)?)
    }

    /// Current reputation profile with a freshly computed score
    pub fn reputation(&self, user_id: Uuid) -> Result<TrustProfile> {
        Ok(self.tracker.score(user_id)?)
    }

    /// Current single/daily/monthly limits for a user
    pub fn transaction_limits(&self, user_id: Uuid) -> Result<LimitTriple> {
        let profile = self.tracker.score(user_id)?;
        Ok(self.limits.limits_for(&profile))
    }

    /// Assess a transaction's risk, record the verdict, and stamp the
    /// transaction's risk score
    pub fn evaluate_transaction_risk(&self, transaction: &Transaction) -> Result<RiskVerdict> {
        let profile = self.tracker.score(transaction.user_id)?;
        let recent: Vec<Transaction> = self
            .transactions
            .recent_for_user(transaction.user_id, RISK_HISTORY_WINDOW)?
            .into_iter()
            .filter(|tx| tx.id != transaction.id)
            .collect();

        let verdict = self.risk.evaluate(transaction, &profile, &recent);

        self.verdicts.put_verdict(verdict.clone())?;
        self.transactions
            .update_risk_score(transaction.id, verdict.risk_score)?;

        Ok(verdict)
    }

    /// Run the independent fraud analysis for a transaction
    pub fn analyze_fraud(&self, transaction: &Transaction) -> Result<FraudVerdict> {
        let mut history = self.history.history_for(transaction.user_id)?;
        // The transaction under analysis is not its own history
        history.transactions.retain(|tx| tx.id != transaction.id);
        Ok(self.fraud.analyze(transaction, &history))
    }

    /// Merge the two independent verdicts into a final transaction status.
    /// Only a fraud block flags the transaction; verification requirements
    /// from either engine hold it pending.
    pub fn final_status(risk: &RiskVerdict, fraud: &FraudVerdict) -> TransactionStatus {
        match &fraud.action {
            FraudAction::Block => TransactionStatus::Flagged,
            FraudAction::AdditionalVerification => TransactionStatus::Pending,
            FraudAction::ApplyLimits { limits } if limits.require_verification => {
                TransactionStatus::Pending
            }
            _ if risk
                .restrictions
                .as_ref()
                .is_some_and(|r| r.require_verification) =>
            {
                TransactionStatus::Pending
            }
            _ => TransactionStatus::Completed,
        }
    }

    /// Persist a transaction's resolved status and feed the outcome back
    /// into the user's reputation
    pub fn resolve_transaction(
        &self,
        transaction_id: Uuid,
        status: TransactionStatus,
    ) -> Result<()> {
        let transaction = self
            .transactions
            .get_transaction(transaction_id)?
            .ok_or(Error::TransactionNotFound(transaction_id))?;

        self.transactions.update_status(transaction_id, status)?;

        if status.is_terminal() {
            let positive = status == TransactionStatus::Completed;
            self.tracker
                .apply_transaction_outcome(transaction.user_id, positive)?;
        }

        info!(%transaction_id, ?status, "transaction resolved");
        Ok(())
    }

    /// Price coverage for a completed transaction
    pub fn evaluate_for_coverage(&self, transaction_id: Uuid) -> Result<CoverageDecision> {
        let transaction = self
            .transactions
            .get_transaction(transaction_id)?
            .ok_or(Error::TransactionNotFound(transaction_id))?;
        let profile = self.tracker.score(transaction.user_id)?;
        Ok(self.underwriter.evaluate(&transaction, &profile))
    }

    /// File a claim against a transaction and resolve it
    pub fn file_claim(&self, transaction_id: Uuid, amount: Decimal) -> Result<ClaimResult> {
        let transaction = self
            .transactions
            .get_transaction(transaction_id)?
            .ok_or(Error::TransactionNotFound(transaction_id))?;
        let profile = self.tracker.score(transaction.user_id)?;
        Ok(self.claims.file_claim(&transaction, &profile, amount)?)
    }
}
