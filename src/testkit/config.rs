//! Canonical test configurations.
//!
//! Single source of truth for config files used across tests.

/// A complete, valid configuration pointing at unroutable local endpoints.
pub const VALID_TOML: &str = r#"
[monitor]
interval_secs = 5
poll_interval_ms = 250
top_price_delta_pct = 2
pairs = ["WETH-USDT", "INJ-USDT"]

[monitor.oracle_aliases]
"WETH-USDT" = "ETH-USDT"

[rules]
enabled = ["low_ask_liquidity", "low_bid_liquidity", "excessive_price_deviation"]

[rules.low_ask_liquidity]
min_liquidity = 1000

[rules.low_bid_liquidity]
min_liquidity = 1000

[rules.excessive_price_deviation]
max_difference_pct = 0.5

[alerts]
urgent_rules = ["excessive_price_deviation"]

[sources.oracle]
name = "oracle"
base_url = "http://127.0.0.1:9"

[sources.monitored]
name = "monitored"
base_url = "http://127.0.0.1:9"

[logging]
level = "warn"
format = "pretty"
"#;

/// Same as [`VALID_TOML`] with `section` appended, overriding earlier keys
/// only when it introduces new tables.
pub fn with_extra(section: &str) -> String {
    format!("{VALID_TOML}\n{section}\n")
}
