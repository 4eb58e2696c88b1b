//! In-memory backend implementing every storage collaborator
//!
//! Backs tests and demos; production hosts inject their own stores. All
//! maps are concurrent, and claim insertion holds the per-transaction
//! entry so uniqueness is atomic rather than check-then-create.

use coverage::{Claim, ClaimStore};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use risk_engine::{RiskVerdict, VerdictStore};
use trust_core::{
    HistorySupplier, ProfileStore, Transaction, TransactionStatus, TransactionStore, TrustProfile,
    UserHistory,
};
use uuid::Uuid;

/// How many recent transactions the history view carries
const HISTORY_WINDOW: usize = 25;

/// Concurrent in-memory implementation of all five storage traits
#[derive(Default)]
pub struct MemoryBackend {
    profiles: DashMap<Uuid, TrustProfile>,
    transactions: DashMap<Uuid, Transaction>,
    verdicts: DashMap<Uuid, RiskVerdict>,
    // Keyed by transaction id: the unique constraint lives in the key
    claims: DashMap<Uuid, Claim>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryBackend {
    fn get_profile(&self, user_id: Uuid) -> trust_core::Result<Option<TrustProfile>> {
        Ok(self.profiles.get(&user_id).map(|p| p.clone()))
    }

    fn put_profile(&self, profile: TrustProfile) -> trust_core::Result<()> {
        self.profiles.insert(profile.user_id, profile);
        Ok(())
    }
}

impl TransactionStore for MemoryBackend {
    fn get_transaction(&self, transaction_id: Uuid) -> trust_core::Result<Option<Transaction>> {
        Ok(self.transactions.get(&transaction_id).map(|t| t.clone()))
    }

    fn put_transaction(&self, transaction: Transaction) -> trust_core::Result<()> {
        self.transactions.insert(transaction.id, transaction);
        Ok(())
    }

    fn update_status(
        &self,
        transaction_id: Uuid,
        status: TransactionStatus,
    ) -> trust_core::Result<()> {
        match self.transactions.get_mut(&transaction_id) {
            Some(mut tx) => {
                tx.status = status;
                tx.updated_at = chrono::Utc::now();
                Ok(())
            }
            None => Err(trust_core::Error::TransactionNotFound(transaction_id)),
        }
    }

    fn update_risk_score(&self, transaction_id: Uuid, risk_score: f64) -> trust_core::Result<()> {
        match self.transactions.get_mut(&transaction_id) {
            Some(mut tx) => {
                tx.risk_score = Some(risk_score);
                Ok(())
            }
            None => Err(trust_core::Error::TransactionNotFound(transaction_id)),
        }
    }

    fn recent_for_user(&self, user_id: Uuid, limit: usize) -> trust_core::Result<Vec<Transaction>> {
        let mut recent: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }
}

impl HistorySupplier for MemoryBackend {
    fn history_for(&self, user_id: Uuid) -> trust_core::Result<UserHistory> {
        let profile = self
            .profiles
            .get(&user_id)
            .map(|p| p.clone())
            .ok_or(trust_core::Error::ProfileNotFound(user_id))?;

        let transactions = self.recent_for_user(user_id, HISTORY_WINDOW)?;

        Ok(UserHistory {
            account_age_days: profile.account_age_days(),
            transactions,
            verification_count: profile.verification_count,
            has_verified: profile.verification_count > 0,
        })
    }
}

impl VerdictStore for MemoryBackend {
    fn put_verdict(&self, verdict: RiskVerdict) -> risk_engine::Result<()> {
        self.verdicts.insert(verdict.transaction_id, verdict);
        Ok(())
    }

    fn get_verdict(&self, transaction_id: Uuid) -> risk_engine::Result<Option<RiskVerdict>> {
        Ok(self.verdicts.get(&transaction_id).map(|v| v.clone()))
    }
}

impl ClaimStore for MemoryBackend {
    fn insert_claim(&self, claim: Claim) -> coverage::Result<()> {
        match self.claims.entry(claim.transaction_id) {
            Entry::Occupied(_) => Err(coverage::Error::DuplicateClaim(claim.transaction_id)),
            Entry::Vacant(slot) => {
                slot.insert(claim);
                Ok(())
            }
        }
    }

    fn get_claim(&self, claim_id: Uuid) -> coverage::Result<Option<Claim>> {
        Ok(self
            .claims
            .iter()
            .find(|entry| entry.id == claim_id)
            .map(|entry| entry.clone()))
    }

    fn claim_for_transaction(&self, transaction_id: Uuid) -> coverage::Result<Option<Claim>> {
        Ok(self.claims.get(&transaction_id).map(|c| c.clone()))
    }

    fn update_claim(&self, claim: Claim) -> coverage::Result<()> {
        self.claims.insert(claim.transaction_id, claim);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    #[test]
    fn test_recent_for_user_orders_newest_first() {
        let backend = MemoryBackend::new();
        let user_id = Uuid::new_v4();

        for i in 0..3 {
            let mut tx = Transaction::new(user_id, Decimal::from(10 + i), None);
            tx.created_at = chrono::Utc::now() - chrono::Duration::hours(3 - i);
            backend.put_transaction(tx).unwrap();
        }

        let recent = backend.recent_for_user(user_id, 10).unwrap();
        assert_eq!(recent.len(), 3);
        assert!(recent[0].created_at > recent[1].created_at);
        assert!(recent[1].created_at > recent[2].created_at);
    }

    #[test]
    fn test_claim_uniqueness_under_concurrency() {
        let backend = Arc::new(MemoryBackend::new());
        let transaction_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let backend = Arc::clone(&backend);
                std::thread::spawn(move || {
                    backend.insert_claim(Claim::new(transaction_id, user_id, Decimal::from(10)))
                })
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();
        assert_eq!(accepted, 1);
    }
}
