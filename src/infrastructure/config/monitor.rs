//! Monitor loop configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::Percent;
use crate::error::ConfigError;
use crate::runtime::validate::{
    check_delta, check_period, parse_aliases, parse_pairs, MAX_INTERVAL, MAX_POLL_INTERVAL,
};

/// Pairs tracked when none are configured.
pub const DEFAULT_PAIRS: &[&str] = &[
    "WETH-USDT",
    "INJ-USDT",
    "ATOM-USDT",
    "TIA-USDT",
    "WMATIC-USDT",
    "SOL-USDT",
    "KAVA-USDT",
    "ARB-USDT",
];

/// Wrapped tokens quoted under their native symbol on the oracle.
pub const DEFAULT_ORACLE_ALIASES: &[(&str, &str)] =
    &[("WMATIC-USDT", "MATIC-USDT"), ("WETH-USDT", "ETH-USDT")];

/// Monitor loop configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between sampling passes (default: 5, at most one day).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// How often the loop checks whether a pass is due (default: 1000, at most one hour).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Band around the monitored price used for depth, in percent (default: 2).
    #[serde(default = "default_top_price_delta_pct")]
    pub top_price_delta_pct: Percent,
    /// Trading pairs in evaluation order.
    #[serde(default = "default_pairs")]
    pub pairs: Vec<String>,
    /// Monitored pair to oracle symbol.
    #[serde(default = "default_oracle_aliases")]
    pub oracle_aliases: BTreeMap<String, String>,
}

const fn default_interval_secs() -> u64 {
    5
}

const fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_top_price_delta_pct() -> Percent {
    Decimal::TWO
}

fn default_pairs() -> Vec<String> {
    DEFAULT_PAIRS.iter().map(|p| (*p).to_string()).collect()
}

fn default_oracle_aliases() -> BTreeMap<String, String> {
    DEFAULT_ORACLE_ALIASES
        .iter()
        .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
        .collect()
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            top_price_delta_pct: default_top_price_delta_pct(),
            pairs: default_pairs(),
            oracle_aliases: default_oracle_aliases(),
        }
    }
}

impl MonitorConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_period("interval_secs", self.interval(), MAX_INTERVAL)?;
        check_period("poll_interval_ms", self.poll_interval(), MAX_POLL_INTERVAL)?;
        check_delta(self.top_price_delta_pct)?;
        parse_pairs(&self.pairs)?;
        parse_aliases(
            self.oracle_aliases
                .iter()
                .map(|(monitored, oracle)| (monitored.as_str(), oracle.as_str())),
        )?;
        Ok(())
    }
}
