//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{pct_difference, MetricsRow, Price, TradingPair};

/// Parse a pair, panicking on malformed input.
pub fn pair(symbol: &str) -> TradingPair {
    TradingPair::parse(symbol).expect("test pair should be valid")
}

/// Builder for a [`MetricsRow`] that starts healthy: equal prices and deep
/// books on both sides, so no built-in rule matches.
pub struct RowBuilder {
    row: MetricsRow,
}

impl RowBuilder {
    pub fn new(symbol: &str) -> Self {
        Self {
            row: MetricsRow {
                trading_pair: pair(symbol),
                oracle_price: Decimal::TEN,
                monitored_price: Decimal::TEN,
                pct_difference: Decimal::ZERO,
                ask_depth_quote: Decimal::new(5000, 0),
                bid_depth_quote: Decimal::new(5000, 0),
            },
        }
    }

    /// Set both prices and derive the percentage difference.
    pub fn prices(mut self, oracle: Price, monitored: Price) -> Self {
        self.row.oracle_price = oracle;
        self.row.monitored_price = monitored;
        self.row.pct_difference =
            pct_difference(monitored, oracle).expect("oracle price should be positive");
        self
    }

    /// Set the percentage difference directly.
    pub fn pct(mut self, pct: Decimal) -> Self {
        self.row.pct_difference = pct;
        self
    }

    pub fn ask_depth(mut self, depth: Decimal) -> Self {
        self.row.ask_depth_quote = depth;
        self
    }

    pub fn bid_depth(mut self, depth: Decimal) -> Self {
        self.row.bid_depth_quote = depth;
        self
    }

    pub fn build(self) -> MetricsRow {
        self.row
    }
}

/// Shorthand for `RowBuilder::new(symbol)`.
pub fn row(symbol: &str) -> RowBuilder {
    RowBuilder::new(symbol)
}
