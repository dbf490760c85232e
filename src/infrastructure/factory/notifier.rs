//! Notifier registry factory.
//!
//! Builds the composite notifier from configuration. Chat credentials come
//! from the environment; an enabled channel without credentials is a
//! configuration error.

use std::sync::Arc;

use tracing::info;

use crate::adapter::notifier::{SlackConfig, SlackNotifier};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::{LogNotifier, Notifier, NotifierRegistry};

#[cfg(feature = "telegram")]
use crate::adapter::notifier::{TelegramConfig, TelegramNotifier};

/// Build the notifier from configuration.
///
/// Falls back to [`LogNotifier`] when no chat channel is enabled. Must be
/// called inside a tokio runtime; chat notifiers spawn their workers here.
pub fn build_notifier(config: &Config) -> Result<Arc<dyn Notifier>> {
    let mut registry = NotifierRegistry::new();

    if config.slack.enabled {
        let slack = SlackConfig::from_env(&config.slack.channel).ok_or(
            ConfigError::MissingField {
                field: "SLACK_BOT_TOKEN",
            },
        )?;
        info!(channel = %slack.channel, "Slack notifier enabled");
        registry.register(Box::new(SlackNotifier::new(slack)));
    }

    if config.telegram.enabled {
        register_telegram(&mut registry)?;
    }

    if registry.is_empty() {
        info!("No chat notifier enabled, alerts go to the log only");
        return Ok(Arc::new(LogNotifier));
    }
    Ok(Arc::new(registry))
}

#[cfg(feature = "telegram")]
fn register_telegram(registry: &mut NotifierRegistry) -> Result<()> {
    let telegram = TelegramConfig::from_env().ok_or(ConfigError::MissingField {
        field: "TELEGRAM_BOT_TOKEN",
    })?;
    info!(chat_id = telegram.chat_id, "Telegram notifier enabled");
    registry.register(Box::new(TelegramNotifier::new(telegram)));
    Ok(())
}

#[cfg(not(feature = "telegram"))]
fn register_telegram(_registry: &mut NotifierRegistry) -> Result<()> {
    Err(ConfigError::InvalidValue {
        field: "telegram.enabled",
        reason: "telegram support requires the telegram feature".to_string(),
    }
    .into())
}
