//! Top-up error taxonomy
//!
//! Flat failure kinds produced by the pipeline stages. The CLI boundary turns
//! one of these into a printed message, an exit code, and a notification.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failure kinds surfaced by the top-up pipeline
#[derive(Debug, Error)]
pub enum TopupError {
    #[error("Failed to load wallet: {0}")]
    WalletLoad(String),

    #[error("Failed to get balance: {0}")]
    BalanceQuery(String),

    #[error("No balance available to top up.")]
    NoBalance,

    #[error("{0}")]
    InvalidAmount(String),

    #[error("Insufficient balance. Available: {available} ARIO, Requested: {requested} ARIO")]
    InsufficientBalance {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Top-up failed: {0}")]
    Submission(String),
}

impl TopupError {
    /// Wrap an underlying wallet read/parse failure
    pub fn wallet_load(err: impl std::fmt::Display) -> Self {
        TopupError::WalletLoad(err.to_string())
    }

    /// Wrap an underlying balance transport/service failure
    pub fn balance_query(err: impl std::fmt::Display) -> Self {
        TopupError::BalanceQuery(err.to_string())
    }

    /// Wrap an underlying submission transport/service failure
    pub fn submission(err: impl std::fmt::Display) -> Self {
        TopupError::Submission(err.to_string())
    }
}

/// Result type for top-up operations
pub type TopupResult<T> = Result<T, TopupError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_texts() {
        assert_eq!(
            TopupError::wallet_load("no such file").to_string(),
            "Failed to load wallet: no such file"
        );
        assert_eq!(
            TopupError::balance_query("timeout").to_string(),
            "Failed to get balance: timeout"
        );
        assert_eq!(
            TopupError::NoBalance.to_string(),
            "No balance available to top up."
        );
        assert_eq!(
            TopupError::InsufficientBalance {
                available: dec("10"),
                requested: dec("15"),
            }
            .to_string(),
            "Insufficient balance. Available: 10 ARIO, Requested: 15 ARIO"
        );
        assert_eq!(
            TopupError::submission("rejected").to_string(),
            "Top-up failed: rejected"
        );
    }
}
