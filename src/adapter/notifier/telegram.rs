//! Telegram notification adapter.
//!
//! Requires the `telegram` feature to be enabled.

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::error::NotifyError;
use crate::port::Notifier;

/// Configuration for the Telegram notifier.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat ID for notifications.
    pub chat_id: i64,
}

impl TelegramConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`. Returns `None` if
    /// either is missing or invalid.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .ok()
            .and_then(|s| s.parse().ok())?;

        Some(Self { bot_token, chat_id })
    }
}

/// Format an alert for Telegram's MarkdownV2 parse mode.
#[must_use]
pub fn format_alert_message(text: &str, urgent: bool) -> String {
    let body = escape_markdown(text);
    if urgent {
        format!("🚨 *URGENT* {body}")
    } else {
        format!("⚠️ {body}")
    }
}

/// Escape special characters for Telegram MarkdownV2.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Telegram notifier that sends messages to a chat.
pub struct TelegramNotifier {
    /// Channel sender for queuing outbound notifications.
    sender: mpsc::UnboundedSender<String>,
}

impl TelegramNotifier {
    /// Create a new Telegram notifier and spawn the background worker.
    #[must_use]
    pub fn new(config: TelegramConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(telegram_worker(config, receiver));
        Self { sender }
    }
}

impl Notifier for TelegramNotifier {
    fn post(&self, text: &str, urgent: bool) -> Result<(), NotifyError> {
        self.sender
            .send(format_alert_message(text, urgent))
            .map_err(|_| NotifyError::ChannelClosed {
                notifier: "telegram",
            })
    }
}

/// Background worker that sends Telegram messages.
async fn telegram_worker(config: TelegramConfig, mut receiver: mpsc::UnboundedReceiver<String>) {
    let bot = Bot::new(&config.bot_token);
    let chat_id = ChatId(config.chat_id);

    info!(chat_id = config.chat_id, "Telegram notifier started");

    while let Some(text) = receiver.recv().await {
        if let Err(e) = bot
            .send_message(chat_id, &text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
        {
            error!(error = %e, "Failed to send Telegram message");
        }
    }

    warn!("Telegram notifier worker shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("hello"), "hello");
        assert_eq!(escape_markdown("INJ-USDT"), "INJ\\-USDT");
        assert_eq!(escape_markdown("below 1000!"), "below 1000\\!");
        assert_eq!(escape_markdown("0.5%"), "0\\.5%");
    }

    #[test]
    fn urgent_alerts_are_flagged() {
        assert!(format_alert_message("x", true).starts_with("🚨 *URGENT*"));
        assert_eq!(format_alert_message("x", false), "⚠️ x");
    }
}
