//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; chat credentials come from the
//! environment (`SLACK_BOT_TOKEN`, `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`).
//!
//! # Example
//!
//! ```no_run
//! use marketwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::alerts::AlertsConfig;
use super::logging::LoggingConfig;
use super::monitor::MonitorConfig;
use super::rules::RulesConfig;
use super::slack::SlackAppConfig;
use super::sources::SourcesConfig;
use super::telegram::TelegramAppConfig;
use crate::error::{ConfigError, Result};
use crate::runtime::validate::check_urgent_rules;

/// Main application configuration.
///
/// Every section is optional. Load from a TOML file using [`Config::load`]
/// or parse directly with [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Pairs, interval and depth band.
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Enabled rules and their thresholds.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Urgency routing and skip diagnostics.
    #[serde(default)]
    pub alerts: AlertsConfig,

    /// Oracle and monitored data sources.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Slack notification configuration.
    #[serde(default)]
    pub slack: SlackAppConfig,

    /// Telegram notification configuration.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize the tracing subscriber.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        self.monitor.validate()?;
        self.rules.validate()?;
        self.sources.validate()?;
        self.logging.validate()?;

        let enabled: Vec<&str> = self.rules.enabled.iter().map(String::as_str).collect();
        check_urgent_rules(
            self.alerts.urgent_rules.iter().map(String::as_str),
            &enabled,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.monitor.interval_secs, 5);
        assert_eq!(config.monitor.poll_interval_ms, 1000);
        assert_eq!(config.monitor.top_price_delta_pct, dec!(2));
        assert_eq!(config.monitor.pairs.len(), 8);
        assert_eq!(config.monitor.pairs[0], "WETH-USDT");
        assert_eq!(
            config.monitor.oracle_aliases.get("WMATIC-USDT").map(String::as_str),
            Some("MATIC-USDT")
        );
        assert_eq!(config.rules.low_ask_liquidity.min_liquidity, dec!(1000));
        assert_eq!(config.rules.low_bid_liquidity.min_liquidity, dec!(1000));
        assert_eq!(
            config.rules.excessive_price_deviation.max_difference_pct,
            dec!(0.5)
        );
        assert_eq!(config.rules.enabled.len(), 3);
        assert!(config.alerts.urgent_rules.is_empty());
        assert!(!config.alerts.notify_skipped_pairs);
        assert_eq!(config.slack.channel, "testnet_market_alerts");
        assert!(!config.slack.enabled);
        assert!(!config.telegram.enabled);
        assert!(config.sources.oracle.is_none());
    }

    #[test]
    fn thresholds_override_defaults() {
        let config = Config::parse_toml(
            r#"
            [rules]
            enabled = ["excessive_price_deviation"]
            [rules.excessive_price_deviation]
            max_difference_pct = 1.25
            "#,
        )
        .unwrap();

        let engine = config.rules.build_engine().unwrap();
        assert_eq!(engine.rule_names(), vec!["excessive_price_deviation"]);
        assert_eq!(
            config.rules.excessive_price_deviation.max_difference_pct,
            dec!(1.25)
        );
    }

    #[test]
    fn rejects_unknown_rule() {
        let err = Config::parse_toml(
            r#"
            [rules]
            enabled = ["low_ask_liquidity", "moon_detector"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "rules.enabled",
                ..
            })
        ));
    }

    #[test]
    fn rejects_urgent_rule_that_is_not_enabled() {
        let err = Config::parse_toml(
            r#"
            [rules]
            enabled = ["low_ask_liquidity"]
            [alerts]
            urgent_rules = ["low_bid_liquidity"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "urgent_rules",
                ..
            })
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Config::parse_toml("[monitor\ninterval_secs = 5").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
