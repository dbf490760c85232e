//! Liquidity floor rules.
//!
//! Flag pairs whose resting notional within the configured price band is
//! too thin on either side of the book.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::AlertRule;
use crate::domain::metrics::MetricsRow;
use crate::error::ConfigError;

/// Threshold for the liquidity rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LiquidityConfig {
    /// Minimum quote-currency depth before alerting.
    #[serde(default = "default_min_liquidity")]
    pub min_liquidity: Decimal,
}

fn default_min_liquidity() -> Decimal {
    Decimal::new(1000, 0)
}

impl Default for LiquidityConfig {
    fn default() -> Self {
        Self {
            min_liquidity: default_min_liquidity(),
        }
    }
}

impl LiquidityConfig {
    /// The floor must not be negative. `field` names it in the error.
    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min_liquidity < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field,
                reason: format!("must be 0 or greater, got {}", self.min_liquidity),
            });
        }
        Ok(())
    }
}

/// Depth rounded for display, trailing zeros stripped.
fn display_depth(depth: Decimal) -> Decimal {
    depth.round_dp(5).normalize()
}

/// Ask-side depth is below the configured floor.
pub struct LowAskLiquidity {
    config: LiquidityConfig,
}

impl LowAskLiquidity {
    #[must_use]
    pub const fn new(config: LiquidityConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &LiquidityConfig {
        &self.config
    }
}

impl AlertRule for LowAskLiquidity {
    fn name(&self) -> &'static str {
        "low_ask_liquidity"
    }

    fn is_match(&self, row: &MetricsRow) -> bool {
        row.ask_depth_quote < self.config.min_liquidity
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate("low_ask_liquidity.min_liquidity")
    }

    fn describe(&self, row: &MetricsRow) -> String {
        format!(
            "Ask liquidity={} is below {}!",
            display_depth(row.ask_depth_quote),
            self.config.min_liquidity.normalize()
        )
    }
}

/// Bid-side depth is below the configured floor.
pub struct LowBidLiquidity {
    config: LiquidityConfig,
}

impl LowBidLiquidity {
    #[must_use]
    pub const fn new(config: LiquidityConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &LiquidityConfig {
        &self.config
    }
}

impl AlertRule for LowBidLiquidity {
    fn name(&self) -> &'static str {
        "low_bid_liquidity"
    }

    fn is_match(&self, row: &MetricsRow) -> bool {
        row.bid_depth_quote < self.config.min_liquidity
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate("low_bid_liquidity.min_liquidity")
    }

    fn describe(&self, row: &MetricsRow) -> String {
        format!(
            "Bid liquidity={} is below {}!",
            display_depth(row.bid_depth_quote),
            self.config.min_liquidity.normalize()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pair::TradingPair;
    use rust_decimal_macros::dec;

    fn row(ask: Decimal, bid: Decimal) -> MetricsRow {
        MetricsRow {
            trading_pair: TradingPair::parse("INJ-USDT").unwrap(),
            oracle_price: dec!(20),
            monitored_price: dec!(20),
            pct_difference: dec!(0),
            ask_depth_quote: ask,
            bid_depth_quote: bid,
        }
    }

    #[test]
    fn ask_rule_uses_strict_inequality() {
        let rule = LowAskLiquidity::new(LiquidityConfig::default());
        assert!(rule.is_match(&row(dec!(999.99), dec!(5000))));
        assert!(!rule.is_match(&row(dec!(1000), dec!(5000))));
        assert!(!rule.is_match(&row(dec!(5000), dec!(0))));
    }

    #[test]
    fn bid_rule_ignores_ask_side() {
        let rule = LowBidLiquidity::new(LiquidityConfig::default());
        assert!(rule.is_match(&row(dec!(5000), dec!(0))));
        assert!(!rule.is_match(&row(dec!(0), dec!(1000))));
    }

    #[test]
    fn describe_cites_depth_and_floor() {
        let rule = LowAskLiquidity::new(LiquidityConfig::default());
        assert_eq!(
            rule.describe(&row(dec!(999), dec!(5000))),
            "Ask liquidity=999 is below 1000!"
        );

        let rule = LowBidLiquidity::new(LiquidityConfig {
            min_liquidity: dec!(2500.00),
        });
        assert_eq!(
            rule.describe(&row(dec!(5000), dec!(12.3456789))),
            "Bid liquidity=12.34568 is below 2500!"
        );
    }

    #[test]
    fn negative_floor_is_rejected() {
        let rule = LowBidLiquidity::new(LiquidityConfig {
            min_liquidity: dec!(-1),
        });
        assert!(matches!(
            rule.validate(),
            Err(ConfigError::InvalidValue {
                field: "low_bid_liquidity.min_liquidity",
                ..
            })
        ));
        assert!(LowAskLiquidity::new(LiquidityConfig { min_liquidity: dec!(0) })
            .validate()
            .is_ok());
    }
}
