//! Slack notification adapter.
//!
//! Posts alerts through the Slack Web API (`chat.postMessage`) as a single
//! `mrkdwn` section block. Delivery happens on a background task so that
//! [`Notifier::post`] never blocks the monitor loop.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::error::NotifyError;
use crate::port::Notifier;

/// Prefix that pings everyone in the channel.
const CHANNEL_SHOUT: &str = "<!channel> => ";

const DEFAULT_API_URL: &str = "https://slack.com/api/chat.postMessage";

/// Configuration for the Slack notifier.
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Bot token (`xoxb-...`).
    pub bot_token: String,
    /// Channel name or ID to post into.
    pub channel: String,
    /// Endpoint override, mainly for tests and proxies.
    pub api_url: String,
}

impl SlackConfig {
    pub fn new(bot_token: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            channel: channel.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `SLACK_BOT_TOKEN`. Returns `None` if it is missing or empty.
    #[must_use]
    pub fn from_env(channel: &str) -> Option<Self> {
        let bot_token = std::env::var("SLACK_BOT_TOKEN").ok()?;
        if bot_token.trim().is_empty() {
            return None;
        }
        Some(Self::new(bot_token, channel))
    }
}

/// Message text as sent to Slack.
#[must_use]
pub fn format_slack_text(text: &str, urgent: bool) -> String {
    if urgent {
        format!("{CHANNEL_SHOUT}{text}")
    } else {
        text.to_string()
    }
}

fn payload(channel: &str, text: &str) -> serde_json::Value {
    json!({
        "channel": channel,
        "text": text,
        "blocks": [{
            "type": "section",
            "text": { "type": "mrkdwn", "text": text },
        }],
    })
}

#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Slack notifier that posts messages to a channel.
pub struct SlackNotifier {
    /// Channel sender for queuing outbound messages.
    sender: mpsc::UnboundedSender<String>,
}

impl SlackNotifier {
    /// Create a new Slack notifier and spawn the background worker.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(config: SlackConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(slack_worker(config, receiver));
        Self { sender }
    }
}

impl Notifier for SlackNotifier {
    fn post(&self, text: &str, urgent: bool) -> Result<(), NotifyError> {
        self.sender
            .send(format_slack_text(text, urgent))
            .map_err(|_| NotifyError::ChannelClosed { notifier: "slack" })
    }
}

/// Background worker that sends Slack messages.
async fn slack_worker(config: SlackConfig, mut receiver: mpsc::UnboundedReceiver<String>) {
    let client = Client::new();

    info!(channel = %config.channel, "Slack notifier started");

    while let Some(text) = receiver.recv().await {
        let result = client
            .post(&config.api_url)
            .bearer_auth(&config.bot_token)
            .json(&payload(&config.channel, &text))
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Failed to send Slack message");
                continue;
            }
        };

        match response.json::<SlackResponse>().await {
            Ok(body) if body.ok => {}
            Ok(body) => {
                error!(
                    error = body.error.as_deref().unwrap_or("unknown"),
                    "Slack rejected message"
                );
            }
            Err(e) => error!(error = %e, "Failed to decode Slack response"),
        }
    }

    warn!("Slack notifier worker shutting down");
}
