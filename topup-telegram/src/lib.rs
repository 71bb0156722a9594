//! topup-telegram: outcome notifications over the Telegram Bot API.
//! - `TelegramClient`: thin Bot API transport with categorized send failures.
//! - `Notifier`: best-effort dispatcher; failures are logged, never raised.
//! - `messages`: the fixed plain-text templates.

pub mod client;
pub mod messages;
pub mod notifier;

pub use client::{
    BotApi, Chat, SendFailure, TelegramClient, TelegramError, Update, DEFAULT_API_URL,
};
pub use notifier::{resolve_recipient, Notifier, Recipient, TelegramNotifier};
