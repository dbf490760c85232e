//! Order book types and depth queries.
//!
//! An order book has two sides:
//! - **Bids**: Buy orders, sorted by price descending (best bid first)
//! - **Asks**: Sell orders, sorted by price ascending (best ask first)
//!
//! # Examples
//!
//! ```
//! use marketwatch::domain::book::{Book, PriceLevel, Side};
//! use rust_decimal_macros::dec;
//!
//! let book = Book::with_levels(
//!     vec![PriceLevel::new(dec!(9.9), dec!(10)), PriceLevel::new(dec!(9.8), dec!(20))],
//!     vec![PriceLevel::new(dec!(10.1), dec!(5)), PriceLevel::new(dec!(10.2), dec!(15))],
//! );
//!
//! assert_eq!(book.mid_price(), Ok(Some(dec!(10.0))));
//! assert_eq!(book.volume_to_price(Side::Ask, dec!(10.15)), Ok(dec!(5)));
//! ```
//!
//! Depth and price queries use checked arithmetic and return
//! [`DomainError::Overflow`] rather than panicking on extreme quotes.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::{Price, Volume};

fn overflow(quantity: &'static str) -> DomainError {
    DomainError::Overflow { quantity }
}

/// Side of the book a depth query walks.
///
/// `Ask` consumes sell orders (a taker buying), `Bid` consumes buy orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Ask,
    Bid,
}

impl Side {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ask => "ask",
            Self::Bid => "bid",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single price level in an order book.
///
/// Represents aggregated orders at a specific price point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    /// The price at this level.
    price: Price,
    /// Total volume available at this price.
    size: Volume,
}

impl PriceLevel {
    /// Creates a new price level.
    #[must_use]
    pub const fn new(price: Price, size: Volume) -> Self {
        Self { price, size }
    }

    /// Returns the price at this level.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns the total volume available at this level.
    #[must_use]
    pub const fn size(&self) -> Volume {
        self.size
    }
}

/// Order book snapshot for a single trading pair.
///
/// Levels are kept sorted best-first regardless of the order they were
/// supplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    /// Bid (buy) levels, sorted by price descending.
    bids: Vec<PriceLevel>,
    /// Ask (sell) levels, sorted by price ascending.
    asks: Vec<PriceLevel>,
}

impl Book {
    /// Creates a new empty order book.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    /// Creates a book from raw levels, dropping empty levels and sorting
    /// each side best-first.
    #[must_use]
    pub fn with_levels(mut bids: Vec<PriceLevel>, mut asks: Vec<PriceLevel>) -> Self {
        bids.retain(|l| l.size > Volume::ZERO);
        asks.retain(|l| l.size > Volume::ZERO);
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        Self { bids, asks }
    }

    /// Returns all bid levels (sorted by price descending).
    #[must_use]
    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    /// Returns all ask levels (sorted by price ascending).
    #[must_use]
    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    /// Returns the best bid (highest buy price).
    #[must_use]
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Returns the best ask (lowest sell price).
    #[must_use]
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// Midpoint between best bid and best ask, if both sides are quoted.
    pub fn mid_price(&self) -> Result<Option<Price>, DomainError> {
        let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) else {
            return Ok(None);
        };
        bid.price
            .checked_add(ask.price)
            .and_then(|sum| sum.checked_div(Price::TWO))
            .map(Some)
            .ok_or_else(|| overflow("mid price"))
    }

    fn levels(&self, side: Side) -> &[PriceLevel] {
        match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        }
    }

    /// Cumulative base volume available at or better than `price`.
    ///
    /// For asks this counts levels priced at or below `price`; for bids,
    /// levels priced at or above it.
    pub fn volume_to_price(&self, side: Side, price: Price) -> Result<Volume, DomainError> {
        self.levels(side)
            .iter()
            .take_while(|level| match side {
                Side::Ask => level.price <= price,
                Side::Bid => level.price >= price,
            })
            .try_fold(Volume::ZERO, |total, level| total.checked_add(level.size))
            .ok_or_else(|| overflow("depth"))
    }

    /// Volume-weighted average price for taking `volume` from `side`.
    ///
    /// When the book holds less than `volume`, the average covers what is
    /// available. Returns `None` for a non-positive volume or an empty side.
    pub fn vwap_for_volume(&self, side: Side, volume: Volume) -> Result<Option<Price>, DomainError> {
        if volume <= Volume::ZERO {
            return Ok(None);
        }

        let mut remaining = volume;
        let mut filled = Volume::ZERO;
        let mut notional = Price::ZERO;

        for level in self.levels(side) {
            if remaining <= Volume::ZERO {
                break;
            }
            let take = remaining.min(level.size);
            notional = take
                .checked_mul(level.price)
                .and_then(|cost| notional.checked_add(cost))
                .ok_or_else(|| overflow("vwap notional"))?;
            filled = filled
                .checked_add(take)
                .ok_or_else(|| overflow("vwap volume"))?;
            remaining -= take;
        }

        if filled.is_zero() {
            return Ok(None);
        }
        notional
            .checked_div(filled)
            .map(Some)
            .ok_or_else(|| overflow("vwap"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn book() -> Book {
        Book::with_levels(
            vec![
                PriceLevel::new(dec!(99), dec!(2)),
                PriceLevel::new(dec!(100), dec!(1)),
                PriceLevel::new(dec!(97), dec!(4)),
            ],
            vec![
                PriceLevel::new(dec!(102), dec!(3)),
                PriceLevel::new(dec!(101), dec!(1)),
                PriceLevel::new(dec!(104), dec!(10)),
            ],
        )
    }

    #[test]
    fn levels_are_sorted_best_first() {
        let book = book();
        assert_eq!(book.best_bid().unwrap().price(), dec!(100));
        assert_eq!(book.best_ask().unwrap().price(), dec!(101));
        assert_eq!(book.mid_price(), Ok(Some(dec!(100.5))));
    }

    #[test]
    fn empty_levels_are_dropped() {
        let book = Book::with_levels(
            vec![PriceLevel::new(dec!(1), dec!(0))],
            vec![PriceLevel::new(dec!(2), dec!(1))],
        );
        assert!(book.best_bid().is_none());
        assert_eq!(book.mid_price(), Ok(None));
    }

    #[test]
    fn volume_to_price_is_inclusive() {
        let book = book();
        assert_eq!(book.volume_to_price(Side::Ask, dec!(102)), Ok(dec!(4)));
        assert_eq!(book.volume_to_price(Side::Ask, dec!(100)), Ok(dec!(0)));
        assert_eq!(book.volume_to_price(Side::Bid, dec!(99)), Ok(dec!(3)));
        assert_eq!(book.volume_to_price(Side::Bid, dec!(90)), Ok(dec!(7)));
    }

    #[test]
    fn vwap_walks_levels_best_first() {
        let book = book();
        // 1 @ 101 + 3 @ 102 = 407 over 4
        assert_eq!(book.vwap_for_volume(Side::Ask, dec!(4)), Ok(Some(dec!(101.75))));
        // 1 @ 100 + 1 @ 99 = 199 over 2
        assert_eq!(book.vwap_for_volume(Side::Bid, dec!(2)), Ok(Some(dec!(99.5))));
    }

    #[test]
    fn vwap_uses_available_volume_when_book_is_thin() {
        let book = Book::with_levels(vec![], vec![PriceLevel::new(dec!(10), dec!(1))]);
        assert_eq!(book.vwap_for_volume(Side::Ask, dec!(5)), Ok(Some(dec!(10))));
        assert_eq!(book.vwap_for_volume(Side::Bid, dec!(5)), Ok(None));
        assert_eq!(book.vwap_for_volume(Side::Ask, dec!(0)), Ok(None));
    }

    #[test]
    fn extreme_levels_overflow_instead_of_panicking() {
        let book = Book::with_levels(
            vec![PriceLevel::new(Decimal::MAX, Decimal::MAX), PriceLevel::new(dec!(1), dec!(1))],
            vec![PriceLevel::new(Decimal::MAX, dec!(2))],
        );

        assert!(matches!(book.mid_price(), Err(DomainError::Overflow { .. })));
        assert!(matches!(
            book.volume_to_price(Side::Bid, dec!(1)),
            Err(DomainError::Overflow { quantity: "depth" })
        ));
        assert!(matches!(
            book.vwap_for_volume(Side::Ask, dec!(2)),
            Err(DomainError::Overflow { .. })
        ));
    }
}
