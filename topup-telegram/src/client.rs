//! Telegram Bot API transport.
//!
//! Thin client over the HTTP Bot API. Failures are classified into
//! `SendFailure` kinds at this boundary so callers never inspect error text.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default Bot API base.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Transport and service failures from the Bot API
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Telegram transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Api(String),
}

impl TelegramError {
    /// Categorize this failure for operator hints.
    pub fn send_failure(&self) -> SendFailure {
        match self {
            TelegramError::Transport(_) => SendFailure::Other,
            TelegramError::Api(description) => classify(description),
        }
    }
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Transport(err.to_string())
    }
}

/// Send-failure categories recognized from the Bot API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendFailure {
    ChatNotFound,
    BotBlocked,
    Unauthorized,
    EmptyMessage,
    Other,
}

fn classify(description: &str) -> SendFailure {
    let lower = description.to_lowercase();
    if lower.contains("chat not found") {
        SendFailure::ChatNotFound
    } else if lower.contains("bot was blocked") {
        SendFailure::BotBlocked
    } else if lower.contains("unauthorized") {
        SendFailure::Unauthorized
    } else if lower.contains("message text is empty") {
        SendFailure::EmptyMessage
    } else {
        SendFailure::Other
    }
}

#[derive(Deserialize)]
struct ApiReply<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// A chat as returned by `getChat`.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// One entry from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub chat: Chat,
    pub from: Option<Sender>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub username: Option<String>,
}

/// The dispatcher-facing transport surface, separable for tests.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Resolve a handle (`@name` or bare) to its numeric chat id.
    async fn lookup_chat(&self, handle: &str) -> Result<i64, TelegramError>;

    /// Send plain text to a chat id, or to a handle in the fallback mode.
    async fn send_text(&self, chat: &str, text: &str) -> Result<(), TelegramError>;
}

#[async_trait]
impl<T: BotApi + ?Sized> BotApi for Arc<T> {
    async fn lookup_chat(&self, handle: &str) -> Result<i64, TelegramError> {
        (**self).lookup_chat(handle).await
    }

    async fn send_text(&self, chat: &str, text: &str) -> Result<(), TelegramError> {
        (**self).send_text(chat, text).await
    }
}

/// Bot API client bound to one bot token.
pub struct TelegramClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(
        token: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// One Bot API call. The API reports failures in the JSON envelope, with
    /// non-2xx statuses carrying the same shape, so the body is parsed
    /// unconditionally.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &impl Serialize,
    ) -> Result<T, TelegramError> {
        let url = format!("{}/bot{}/{}", self.api_url, self.token, method);
        debug!(method, "calling Bot API");
        let reply: ApiReply<T> = self.http.post(&url).json(params).send().await?.json().await?;
        if reply.ok {
            reply
                .result
                .ok_or_else(|| TelegramError::Api("empty result".to_string()))
        } else {
            Err(TelegramError::Api(
                reply
                    .description
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }

    pub async fn get_chat(&self, chat_id: &str) -> Result<Chat, TelegramError> {
        self.call("getChat", &json!({ "chat_id": chat_id })).await
    }

    pub async fn get_updates(&self) -> Result<Vec<Update>, TelegramError> {
        self.call("getUpdates", &json!({})).await
    }
}

#[async_trait]
impl BotApi for TelegramClient {
    async fn lookup_chat(&self, handle: &str) -> Result<i64, TelegramError> {
        let chat = self.get_chat(handle).await?;
        Ok(chat.id)
    }

    async fn send_text(&self, chat: &str, text: &str) -> Result<(), TelegramError> {
        let _reply: serde_json::Value = self
            .call("sendMessage", &json!({ "chat_id": chat, "text": text }))
            .await?;
        Ok(())
    }
}
