//! Slack notification configuration.

use serde::Deserialize;

fn default_channel() -> String {
    "testnet_market_alerts".into()
}

/// Slack notification configuration.
///
/// The bot token comes from `SLACK_BOT_TOKEN`, never from the file.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackAppConfig {
    /// Enable slack notifications.
    #[serde(default)]
    pub enabled: bool,
    /// Channel to post alerts into.
    #[serde(default = "default_channel")]
    pub channel: String,
}

impl Default for SlackAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            channel: default_channel(),
        }
    }
}
