//! Best-effort outcome notification.
//!
//! The dispatcher resolves the configured recipient handle once, then pushes
//! outcome messages through a single send primitive. Nothing in here can fail
//! the top-up: send errors are logged with a category hint and swallowed.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::client::{BotApi, SendFailure, TelegramClient};
use crate::messages;
use topup_core::TopupReport;

/// Where notifications go. `Unresolved` means both lookups failed and the
/// handle itself is used as a last-resort target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Resolved(String),
    Unresolved(String),
}

impl Recipient {
    /// The string handed to the transport as `chat_id`.
    pub fn target(&self) -> &str {
        match self {
            Recipient::Resolved(id) => id,
            Recipient::Unresolved(handle) => handle,
        }
    }
}

/// Resolve a handle to a chat id. A fully numeric handle is already an id and
/// needs no lookup; otherwise the `@`-prefixed form is tried before the bare
/// one. Never fails: an unresolvable handle degrades to `Unresolved`.
pub async fn resolve_recipient<T: BotApi>(bot: &T, handle: &str) -> Recipient {
    if handle.parse::<i64>().is_ok() {
        return Recipient::Resolved(handle.to_string());
    }

    let clean = handle.trim_start_matches('@');
    let prefixed = format!("@{clean}");
    match bot.lookup_chat(&prefixed).await {
        Ok(id) => {
            info!(chat_id = id, handle = %prefixed, "resolved chat id");
            return Recipient::Resolved(id.to_string());
        }
        Err(err) => info!(handle = %prefixed, error = %err, "chat id lookup failed"),
    }
    match bot.lookup_chat(clean).await {
        Ok(id) => {
            info!(chat_id = id, handle = clean, "resolved chat id");
            return Recipient::Resolved(id.to_string());
        }
        Err(err) => info!(handle = clean, error = %err, "chat id lookup failed"),
    }

    warn!(
        handle,
        "could not resolve a chat id; falling back to the handle. Message the \
         bot first (send /start) or pass a numeric id via --telegram-username."
    );
    Recipient::Unresolved(prefixed)
}

struct Channel<T> {
    bot: T,
    recipient: Recipient,
}

/// Outcome dispatcher over any `BotApi` transport.
pub struct Notifier<T> {
    channel: Option<Channel<T>>,
}

/// The production dispatcher.
pub type TelegramNotifier = Notifier<TelegramClient>;

impl<T: BotApi> Notifier<T> {
    /// A dispatcher with no transport; every notify call is a silent no-op.
    pub fn disabled() -> Self {
        Self { channel: None }
    }

    /// Bind a transport and resolve the recipient once for this process.
    pub async fn connect(bot: T, handle: &str) -> Self {
        let recipient = resolve_recipient(&bot, handle).await;
        Self {
            channel: Some(Channel { bot, recipient }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.channel.is_some()
    }

    pub fn recipient(&self) -> Option<&Recipient> {
        self.channel.as_ref().map(|channel| &channel.recipient)
    }

    pub async fn notify_success(&self, report: &TopupReport) {
        self.send(messages::success(report)).await;
    }

    pub async fn notify_error(&self, public_key: &str, message: &str, requested: Option<&str>) {
        self.send(messages::error(public_key, message, requested))
            .await;
    }

    pub async fn notify_insufficient_balance(
        &self,
        public_key: &str,
        available: Decimal,
        requested: Decimal,
    ) {
        self.send(messages::insufficient_balance(
            public_key, available, requested,
        ))
        .await;
    }

    pub async fn notify_no_balance(&self, public_key: &str) {
        self.send(messages::no_balance(public_key)).await;
    }

    pub async fn notify_invalid_amount(&self, public_key: &str, reason: &str, requested: &str) {
        self.send(messages::invalid_amount(public_key, reason, requested))
            .await;
    }

    /// The one send primitive behind every notify method.
    async fn send(&self, text: String) {
        let Some(channel) = &self.channel else {
            return;
        };
        if text.trim().is_empty() {
            warn!("refusing to send an empty notification");
            return;
        }

        let chat = channel.recipient.target();
        match channel.bot.send_text(chat, &text).await {
            Ok(()) => info!(chat, "notification sent"),
            Err(err) => warn!(
                chat,
                error = %err,
                "notification send failed: {}",
                failure_hint(err.send_failure())
            ),
        }
    }
}

fn failure_hint(kind: SendFailure) -> &'static str {
    match kind {
        SendFailure::ChatNotFound => {
            "chat not found; message the bot first (send /start) or pass a numeric chat id"
        }
        SendFailure::BotBlocked => "the bot was blocked by the recipient; unblock it and retry",
        SendFailure::Unauthorized => "the bot token was rejected; check --telegram-bot-token",
        SendFailure::EmptyMessage => "the transport rejected an empty message",
        SendFailure::Other => "make sure the recipient has started a conversation with the bot",
    }
}
