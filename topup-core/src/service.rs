//! Top-up orchestration.
//!
//! `TopupService` runs the four-stage pipeline (load wallet, query balance,
//! calculate amount, submit) over injected collaborators so tests can swap
//! in fakes. Each stage short-circuits; nothing is retried.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::path::Path;
use tracing::info;

use crate::amount::{self, AmountKind};
use crate::balance::{Balance, TokenAmount};
use crate::error::{TopupError, TopupResult};
use crate::wallet::{self, Wallet};

/// Remote service answering raw-unit balance queries for an address.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn raw_balance(&self, address: &str) -> anyhow::Result<u64>;
}

/// Remote service accepting signed top-up submissions.
#[async_trait]
pub trait TopupGateway: Send + Sync {
    async fn submit_top_up(
        &self,
        wallet: &Wallet,
        amount: TokenAmount,
    ) -> anyhow::Result<TopupReceipt>;
}

/// What the submission service reports back for an accepted top-up.
#[derive(Debug, Clone)]
pub struct TopupReceipt {
    pub status: String,
    pub id: String,
}

/// Outcome of one completed top-up run.
#[derive(Debug, Clone)]
pub struct TopupReport {
    pub public_key: String,
    pub balance_before: Decimal,
    pub topup_amount: Decimal,
    pub topup_kind: AmountKind,
    pub topup_value: Decimal,
    pub status: String,
    pub transaction_id: String,
    /// Computed locally as `balance_before - topup_amount`, never taken from
    /// a remote response.
    pub remaining_balance: Decimal,
}

pub struct TopupService<B, G> {
    balances: B,
    gateway: G,
}

impl<B: BalanceSource, G: TopupGateway> TopupService<B, G> {
    pub fn new(balances: B, gateway: G) -> Self {
        Self { balances, gateway }
    }

    /// Run the whole pipeline for one wallet and one amount spec.
    pub async fn execute(&self, wallet_path: &Path, raw_spec: &str) -> TopupResult<TopupReport> {
        let loaded = wallet::load_wallet(wallet_path)?;
        info!(public_key = %loaded.public_key, "wallet loaded");

        let raw = self
            .balances
            .raw_balance(&loaded.public_key)
            .await
            .map_err(TopupError::balance_query)?;
        let balance = Balance::from_raw(raw);
        info!(raw, decimal = %balance.decimal, "balance queried");

        if !balance.has_funds() {
            return Err(TopupError::NoBalance);
        }

        let calc = amount::calculate(raw_spec, balance.decimal)?;
        let token_amount = TokenAmount::from_decimal(calc.amount)?;
        info!(amount = %calc.amount, kind = %calc.kind, "top-up amount calculated");

        let receipt = self
            .gateway
            .submit_top_up(&loaded.wallet, token_amount)
            .await
            .map_err(TopupError::submission)?;
        info!(status = %receipt.status, id = %receipt.id, "top-up submitted");

        Ok(TopupReport {
            public_key: loaded.public_key,
            balance_before: balance.decimal,
            topup_amount: calc.amount,
            topup_kind: calc.kind,
            topup_value: calc.value,
            status: receipt.status,
            transaction_id: receipt.id,
            remaining_balance: balance.decimal - calc.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedBalance(u64);

    #[async_trait]
    impl BalanceSource for FixedBalance {
        async fn raw_balance(&self, _address: &str) -> anyhow::Result<u64> {
            Ok(self.0)
        }
    }

    struct FailingBalance;

    #[async_trait]
    impl BalanceSource for FailingBalance {
        async fn raw_balance(&self, _address: &str) -> anyhow::Result<u64> {
            Err(anyhow!("gateway unreachable"))
        }
    }

    #[derive(Default)]
    struct RecordingGateway {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TopupGateway for RecordingGateway {
        async fn submit_top_up(
            &self,
            _wallet: &Wallet,
            amount: TokenAmount,
        ) -> anyhow::Result<TopupReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TopupReceipt {
                status: "confirmed".into(),
                id: format!("tx-{}", amount.0),
            })
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl TopupGateway for FailingGateway {
        async fn submit_top_up(
            &self,
            _wallet: &Wallet,
            _amount: TokenAmount,
        ) -> anyhow::Result<TopupReceipt> {
            Err(anyhow!("payment service rejected the request"))
        }
    }

    fn temp_wallet(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("topup-service-tests-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, r#"{"kty":"RSA","n":"abc","d":"def"}"#).unwrap();
        path
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_fifty_percent_topup() {
        let path = temp_wallet("wallet123.json");
        let calls = Arc::new(AtomicUsize::new(0));
        let service = TopupService::new(
            FixedBalance(5_000_000),
            RecordingGateway {
                calls: calls.clone(),
            },
        );

        let report = service.execute(&path, "50%").await.unwrap();
        assert_eq!(report.public_key, "wallet123");
        assert_eq!(report.balance_before, dec("5"));
        assert_eq!(report.topup_amount, dec("2.5"));
        assert_eq!(report.remaining_balance, dec("2.5"));
        assert_eq!(report.topup_kind, AmountKind::Percentage);
        assert_eq!(report.transaction_id, "tx-2500000");
        assert_eq!(report.status, "confirmed");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_remaining_balance_is_exact() {
        let path = temp_wallet("drift.json");
        let service = TopupService::new(FixedBalance(3_333_333), RecordingGateway::default());

        let report = service.execute(&path, "33.33%").await.unwrap();
        assert_eq!(
            report.remaining_balance + report.topup_amount,
            report.balance_before
        );
    }

    #[tokio::test]
    async fn test_zero_balance_short_circuits() {
        let path = temp_wallet("empty.json");
        let calls = Arc::new(AtomicUsize::new(0));
        let service = TopupService::new(
            FixedBalance(0),
            RecordingGateway {
                calls: calls.clone(),
            },
        );

        // The spec is not even parseable; NoBalance must still win because
        // the zero check runs before any calculation.
        let err = service.execute(&path, "not-a-number").await.unwrap_err();
        assert!(matches!(err, TopupError::NoBalance));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_insufficient_balance_skips_submission() {
        let path = temp_wallet("small.json");
        let calls = Arc::new(AtomicUsize::new(0));
        let service = TopupService::new(
            FixedBalance(10_000_000),
            RecordingGateway {
                calls: calls.clone(),
            },
        );

        let err = service.execute(&path, "15").await.unwrap_err();
        match err {
            TopupError::InsufficientBalance {
                available,
                requested,
            } => {
                assert_eq!(available, dec("10"));
                assert_eq!(requested, dec("15"));
            }
            other => panic!("expected InsufficientBalance, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_wallet_is_load_error() {
        let service = TopupService::new(FixedBalance(5_000_000), RecordingGateway::default());
        let err = service
            .execute(Path::new("/nonexistent/missing.json"), "50%")
            .await
            .unwrap_err();
        assert!(matches!(err, TopupError::WalletLoad(_)));
    }

    #[tokio::test]
    async fn test_balance_transport_failure() {
        let path = temp_wallet("unreachable.json");
        let service = TopupService::new(FailingBalance, RecordingGateway::default());
        let err = service.execute(&path, "50%").await.unwrap_err();
        match err {
            TopupError::BalanceQuery(msg) => assert!(msg.contains("gateway unreachable")),
            other => panic!("expected BalanceQuery, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submission_failure_is_wrapped() {
        let path = temp_wallet("rejected.json");
        let service = TopupService::new(FixedBalance(5_000_000), FailingGateway);
        let err = service.execute(&path, "1").await.unwrap_err();
        match err {
            TopupError::Submission(msg) => {
                assert!(msg.contains("payment service rejected"))
            }
            other => panic!("expected Submission, got {other:?}"),
        }
    }
}
