//! Configuration for the risk engine

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Weights applied to the five risk factors. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorWeights {
    /// Requested amount relative to the single-transaction limit
    pub amount_vs_limit: f64,

    /// Depth of the user's transaction history
    pub user_history: f64,

    /// Whether the recipient has been paid before
    pub recipient_history: f64,

    /// Deviation from the user's recent amount pattern
    pub amount_pattern: f64,

    /// Time of day of the request
    pub time_of_day: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            amount_vs_limit: 0.35,
            user_history: 0.15,
            recipient_history: 0.25,
            amount_pattern: 0.20,
            time_of_day: 0.05,
        }
    }
}

impl FactorWeights {
    /// Validate that the weights form a distribution
    pub fn validate(&self) -> Result<()> {
        let weights = [
            self.amount_vs_limit,
            self.user_history,
            self.recipient_history,
            self.amount_pattern,
            self.time_of_day,
        ];
        if weights.iter().any(|w| *w < 0.0) {
            return Err(Error::InvalidWeights("negative weight".to_string()));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(Error::InvalidWeights(format!(
                "weights sum to {sum}, expected 1.0"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        FactorWeights::default().validate().unwrap();
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let weights = FactorWeights {
            amount_vs_limit: 0.9,
            ..FactorWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = FactorWeights {
            time_of_day: -0.05,
            amount_vs_limit: 0.45,
            ..FactorWeights::default()
        };
        assert!(weights.validate().is_err());
    }
}
