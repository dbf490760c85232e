//! Market data ports.
//!
//! The monitor reads prices from two sources: an oracle it trusts and the
//! monitored venue, which must also answer depth queries.

use async_trait::async_trait;

use crate::domain::{Price, Side, TradingPair, Volume};
use crate::error::SourceError;

/// A source of mid prices.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Current mid price, or `None` if the market is not quoted yet.
    async fn mid_price(&self, pair: &TradingPair) -> Result<Option<Price>, SourceError>;
}

/// A source of order book depth.
#[async_trait]
pub trait DepthSource: Send + Sync {
    /// Cumulative base volume available at or better than `price`.
    async fn base_volume_to_price(
        &self,
        pair: &TradingPair,
        side: Side,
        price: Price,
    ) -> Result<Volume, SourceError>;

    /// Average execution price for taking exactly `base_volume`.
    async fn vwap_for_volume(
        &self,
        pair: &TradingPair,
        side: Side,
        base_volume: Volume,
    ) -> Result<Option<Price>, SourceError>;
}

/// A venue that answers both price and depth queries.
pub trait MarketSource: PriceSource + DepthSource {}

impl<T: PriceSource + DepthSource> MarketSource for T {}
