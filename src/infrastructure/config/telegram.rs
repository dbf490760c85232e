//! Telegram notification configuration.

use serde::Deserialize;

/// Telegram notification configuration.
///
/// The bot token and chat ID come from `TELEGRAM_BOT_TOKEN` and
/// `TELEGRAM_CHAT_ID`, never from the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// Enable telegram notifications.
    #[serde(default)]
    pub enabled: bool,
}
