//! Top-up submission against the Turbo payment service.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use topup_core::{TokenAmount, TopupGateway, TopupReceipt, Wallet};

use crate::signing;

/// Client for the payment service's ARIO top-up endpoint.
pub struct TurboClient {
    http: reqwest::Client,
    base_url: String,
}

impl TurboClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TopupGateway for TurboClient {
    async fn submit_top_up(
        &self,
        wallet: &Wallet,
        amount: TokenAmount,
    ) -> anyhow::Result<TopupReceipt> {
        #[derive(Serialize)]
        struct Body<'a> {
            token_amount: String,
            key_commitment: &'a str,
            nonce: u64,
            signature: String,
        }
        #[derive(Deserialize)]
        struct Resp {
            status: String,
            id: String,
        }

        let credential = wallet.as_bytes();
        let commitment = signing::key_commitment(credential);
        let nonce: u64 = rand::thread_rng().gen();
        let signature = signing::sign_top_up(credential, &commitment, amount.0, nonce)?;
        let body = Body {
            token_amount: amount.to_string(),
            key_commitment: &commitment,
            nonce,
            signature,
        };

        let url = format!("{}/v1/top-up/ario", self.base_url);
        debug!(%url, amount = amount.0, "submitting top-up");
        let resp: Resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(TopupReceipt {
            status: resp.status,
            id: resp.id,
        })
    }
}
