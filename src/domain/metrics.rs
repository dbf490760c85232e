//! Per-pair observations and the snapshot table they form.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::money::{Percent, Price};
use super::pair::TradingPair;

/// One observation of a trading pair taken during a sampling pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsRow {
    pub trading_pair: TradingPair,
    pub oracle_price: Price,
    pub monitored_price: Price,
    /// Signed deviation of the monitored price from the oracle, in percent.
    pub pct_difference: Percent,
    /// Quote notional resting within `+delta%` of the monitored price.
    pub ask_depth_quote: Decimal,
    /// Quote notional resting within `-delta%` of the monitored price.
    pub bid_depth_quote: Decimal,
}

/// `(monitored - oracle) / oracle * 100`.
///
/// Returns `None` when the oracle price is not positive or the result does
/// not fit a `Decimal`.
#[must_use]
pub fn pct_difference(monitored: Price, oracle: Price) -> Option<Percent> {
    if oracle <= Price::ZERO {
        return None;
    }
    monitored
        .checked_sub(oracle)?
        .checked_div(oracle)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Table of rows produced by one completed sampling pass.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    taken_at: DateTime<Utc>,
    rows: Vec<MetricsRow>,
}

impl Snapshot {
    #[must_use]
    pub fn new(rows: Vec<MetricsRow>) -> Self {
        Self {
            taken_at: Utc::now(),
            rows,
        }
    }

    /// Placeholder table used before the first pass completes.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub const fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    #[must_use]
    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, pair: &TradingPair) -> Option<&MetricsRow> {
        self.rows.iter().find(|r| &r.trading_pair == pair)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn pct_difference_is_relative_to_oracle() {
        assert_eq!(pct_difference(dec!(10.1), dec!(10)), Some(dec!(1)));
        assert_eq!(pct_difference(dec!(9.94), dec!(10)), Some(dec!(-0.6)));
        assert_eq!(pct_difference(dec!(10), dec!(10)), Some(dec!(0)));
    }

    #[test]
    fn pct_difference_rejects_non_positive_oracle() {
        assert_eq!(pct_difference(dec!(10), dec!(0)), None);
        assert_eq!(pct_difference(dec!(10), dec!(-1)), None);
    }

    #[test]
    fn snapshot_looks_up_rows_by_pair() {
        let pair = TradingPair::parse("INJ-USDT").unwrap();
        let snapshot = Snapshot::new(vec![MetricsRow {
            trading_pair: pair.clone(),
            oracle_price: dec!(1),
            monitored_price: dec!(1),
            pct_difference: dec!(0),
            ask_depth_quote: dec!(5000),
            bid_depth_quote: dec!(5000),
        }]);

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.row(&pair).is_some());
        assert!(Snapshot::empty().is_empty());
    }
}
