//! Balance queries against the ARIO token process.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use topup_core::BalanceSource;

/// Client for the gateway endpoint serving process token balances.
pub struct AntClient {
    http: reqwest::Client,
    base_url: String,
    process_id: String,
}

impl AntClient {
    pub fn new(base_url: impl Into<String>, process_id: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            process_id: process_id.into(),
        })
    }
}

#[derive(Deserialize)]
struct BalanceResp {
    balance: String,
}

#[async_trait]
impl BalanceSource for AntClient {
    async fn raw_balance(&self, address: &str) -> anyhow::Result<u64> {
        let url = format!(
            "{}/v1/process/{}/balance/{}",
            self.base_url, self.process_id, address
        );
        debug!(%url, "querying balance");
        let resp: BalanceResp = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let raw = resp
            .balance
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("bad balance payload {:?}: {}", resp.balance, e))?;
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_resp_parses() {
        let resp: BalanceResp = serde_json::from_str(r#"{"balance":"5000000"}"#).unwrap();
        assert_eq!(resp.balance, "5000000");
    }

    #[test]
    fn test_client_normalizes_base_url() {
        let client = AntClient::new("https://cu.example/", "proc-1").unwrap();
        assert_eq!(client.base_url, "https://cu.example");
    }
}
