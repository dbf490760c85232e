//! Handler for the `check` command.

use std::path::Path;

use crate::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate configuration file without starting the monitor.
pub fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    output::note(&format!("Checking configuration: {}", path.display()));

    let config = match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            output::error(&format!("Configuration is invalid: {e}"));
            return Err(e);
        }
    };
    output::ok("Configuration file is valid");

    output::section("Monitor");
    output::key_value("Pairs", config.monitor.pairs.join(", "));
    output::key_value("Interval", format!("{}s", config.monitor.interval_secs));
    output::key_value(
        "Depth band",
        format!("±{}%", config.monitor.top_price_delta_pct.normalize()),
    );
    output::key_value("Rules", config.rules.enabled.join(", "));
    if !config.alerts.urgent_rules.is_empty() {
        output::key_value("Urgent", config.alerts.urgent_rules.join(", "));
    }

    output::section("Sources");
    for (label, source) in [
        ("Oracle", &config.sources.oracle),
        ("Monitored", &config.sources.monitored),
    ] {
        match source {
            Some(source) => output::key_value(label, output::highlight(&source.base_url)),
            None => output::warn(&format!("{label} source not configured; `run` will fail")),
        }
    }

    output::section("Notifications");
    if config.slack.enabled {
        if std::env::var("SLACK_BOT_TOKEN").is_ok() {
            output::ok(&format!("Slack enabled (#{})", config.slack.channel));
        } else {
            output::warn("Slack enabled but SLACK_BOT_TOKEN is not set");
        }
    }
    if config.telegram.enabled {
        let token = std::env::var("TELEGRAM_BOT_TOKEN").is_ok();
        let chat = std::env::var("TELEGRAM_CHAT_ID").is_ok();
        if token && chat {
            output::ok("Telegram enabled");
        } else {
            output::warn("Telegram enabled but TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID is not set");
        }
    }
    if !config.slack.enabled && !config.telegram.enabled {
        output::note("No chat channel enabled; alerts are written to the log");
    }

    Ok(())
}
