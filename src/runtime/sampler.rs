//! Metrics sampling.
//!
//! For every tracked pair the sampler reads the oracle and monitored mid
//! prices, measures how much quote notional rests within `±delta%` of the
//! monitored price, and turns the result into a [`MetricsRow`]. A pair whose
//! data is missing or invalid is skipped for the pass; the rest continue.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::{
    pct_difference, MetricsRow, PairAliases, Percent, Price, Side, TradingPair, Volume,
};
use crate::error::{MonitorError, SourceError};
use crate::port::{MarketSource, PriceSource};

/// Default band around the monitored price used for depth, in percent.
pub const DEFAULT_DELTA_PCT: Decimal = Decimal::TWO;

/// Output of one sampling pass.
#[derive(Debug, Default)]
pub struct SampleReport {
    /// One row per successfully sampled pair, in configured order.
    pub rows: Vec<MetricsRow>,
    /// Pairs skipped this pass and why.
    pub skipped: Vec<MonitorError>,
}

/// Trigger prices `(ask, bid)` at `±delta_pct` around `price`.
///
/// Returns `None` if either price does not fit a `Decimal`.
#[must_use]
pub fn trigger_prices(price: Price, delta_pct: Percent) -> Option<(Price, Price)> {
    let delta = delta_pct.checked_div(Decimal::ONE_HUNDRED)?;
    let ask = price.checked_mul(Decimal::ONE.checked_add(delta)?)?;
    let bid = price.checked_mul(Decimal::ONE.checked_sub(delta)?)?;
    Some((ask, bid))
}

/// Computes metrics rows from an oracle and a monitored source.
pub struct MetricsSampler {
    oracle: Arc<dyn PriceSource>,
    monitored: Arc<dyn MarketSource>,
    aliases: PairAliases,
    delta_pct: Percent,
}

impl MetricsSampler {
    pub fn new(
        oracle: Arc<dyn PriceSource>,
        monitored: Arc<dyn MarketSource>,
        aliases: PairAliases,
        delta_pct: Percent,
    ) -> Self {
        Self {
            oracle,
            monitored,
            aliases,
            delta_pct,
        }
    }

    #[must_use]
    pub const fn delta_pct(&self) -> Percent {
        self.delta_pct
    }

    #[must_use]
    pub const fn aliases(&self) -> &PairAliases {
        &self.aliases
    }

    /// Sample every pair in order. Failures are isolated per pair.
    pub async fn sample(&self, pairs: &[TradingPair]) -> SampleReport {
        let mut report = SampleReport::default();

        for pair in pairs {
            match self.sample_pair(pair).await {
                Ok(row) => {
                    debug!(
                        pair = %pair,
                        oracle = %row.oracle_price,
                        monitored = %row.monitored_price,
                        pct = %row.pct_difference,
                        "Sampled pair"
                    );
                    report.rows.push(row);
                }
                Err(e) => {
                    warn!(pair = %pair, error = %e, "Skipping pair this tick");
                    report.skipped.push(e);
                }
            }
        }

        report
    }

    /// Build the row for a single pair.
    pub async fn sample_pair(&self, pair: &TradingPair) -> Result<MetricsRow, MonitorError> {
        let oracle_pair = self.aliases.resolve(pair);

        // Both quotes are awaited together before any arithmetic.
        let (oracle, monitored) = tokio::join!(
            self.oracle.mid_price(oracle_pair),
            self.monitored.mid_price(pair)
        );
        let oracle_price = self.quote(pair, self.oracle.name(), oracle)?;
        let monitored_price = self.quote(pair, self.monitored.name(), monitored)?;

        if oracle_price <= Price::ZERO {
            return Err(MonitorError::InvalidOraclePrice {
                pair: pair.clone(),
                price: oracle_price,
            });
        }

        let (ask_price, bid_price) = trigger_prices(monitored_price, self.delta_pct)
            .ok_or_else(|| MonitorError::Arithmetic {
                pair: pair.clone(),
                field: "trigger_price",
            })?;
        let (ask_depth, bid_depth) = tokio::join!(
            self.depth_in_quote(pair, Side::Ask, ask_price),
            self.depth_in_quote(pair, Side::Bid, bid_price)
        );

        let pct = pct_difference(monitored_price, oracle_price).ok_or_else(|| {
            MonitorError::Arithmetic {
                pair: pair.clone(),
                field: "pct_difference",
            }
        })?;

        Ok(MetricsRow {
            trading_pair: pair.clone(),
            oracle_price,
            monitored_price,
            pct_difference: pct,
            ask_depth_quote: ask_depth?,
            bid_depth_quote: bid_depth?,
        })
    }

    fn quote(
        &self,
        pair: &TradingPair,
        source_name: &str,
        result: Result<Option<Price>, SourceError>,
    ) -> Result<Price, MonitorError> {
        match result {
            Ok(Some(price)) => Ok(price),
            Ok(None) => Err(MonitorError::MissingQuote {
                pair: pair.clone(),
                source_name: source_name.to_string(),
            }),
            Err(error) => Err(MonitorError::SourceFailure {
                pair: pair.clone(),
                source_name: source_name.to_string(),
                error,
            }),
        }
    }

    /// Quote notional resting at or better than `trigger` on `side`.
    async fn depth_in_quote(
        &self,
        pair: &TradingPair,
        side: Side,
        trigger: Price,
    ) -> Result<Decimal, MonitorError> {
        let source_name = self.monitored.name();
        let failure = |error| MonitorError::SourceFailure {
            pair: pair.clone(),
            source_name: source_name.to_string(),
            error,
        };

        let base: Volume = self
            .monitored
            .base_volume_to_price(pair, side, trigger)
            .await
            .map_err(failure)?;

        if base < Volume::ZERO {
            return Err(MonitorError::InvalidDepth {
                pair: pair.clone(),
                side,
                volume: base,
            });
        }
        if base.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let vwap = self
            .monitored
            .vwap_for_volume(pair, side, base)
            .await
            .map_err(failure)?
            .ok_or_else(|| MonitorError::MissingQuote {
                pair: pair.clone(),
                source_name: source_name.to_string(),
            })?;

        let notional = base
            .checked_mul(vwap)
            .ok_or_else(|| MonitorError::Arithmetic {
                pair: pair.clone(),
                field: "depth",
            })?;

        if notional < Decimal::ZERO {
            return Err(MonitorError::InvalidDepth {
                pair: pair.clone(),
                side,
                volume: notional,
            });
        }
        Ok(notional)
    }
}
