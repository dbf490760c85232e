//! In-memory order book source.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::error::DomainError;
use crate::domain::{Book, Price, Side, TradingPair, Volume};
use crate::error::SourceError;
use crate::port::{DepthSource, PriceSource};

/// Thread-safe cache of order books answering price and depth queries.
///
/// Used directly when books are pushed from elsewhere, and as the backing
/// store of [`RestBookSource`](super::RestBookSource).
pub struct BookSource {
    name: String,
    books: RwLock<HashMap<TradingPair, Book>>,
}

impl BookSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            books: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the book for `pair`.
    pub fn update(&self, pair: TradingPair, book: Book) {
        self.books.write().insert(pair, book);
    }

    /// Drop the book for `pair`, making it unquoted.
    pub fn remove(&self, pair: &TradingPair) {
        self.books.write().remove(pair);
    }

    /// Get a snapshot of a book.
    #[must_use]
    pub fn get(&self, pair: &TradingPair) -> Option<Book> {
        self.books.read().get(pair).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_book<T>(
        &self,
        pair: &TradingPair,
        f: impl FnOnce(&Book) -> Result<T, DomainError>,
    ) -> Result<T, SourceError> {
        let books = self.books.read();
        let book = books
            .get(pair)
            .ok_or_else(|| SourceError::UnknownSymbol(pair.to_string()))?;
        f(book).map_err(|error| SourceError::InvalidBook {
            symbol: pair.to_string(),
            error,
        })
    }
}

#[async_trait]
impl PriceSource for BookSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn mid_price(&self, pair: &TradingPair) -> Result<Option<Price>, SourceError> {
        match self.with_book(pair, Book::mid_price) {
            Err(SourceError::UnknownSymbol(_)) => Ok(None),
            other => other,
        }
    }
}

#[async_trait]
impl DepthSource for BookSource {
    async fn base_volume_to_price(
        &self,
        pair: &TradingPair,
        side: Side,
        price: Price,
    ) -> Result<Volume, SourceError> {
        self.with_book(pair, |book| book.volume_to_price(side, price))
    }

    async fn vwap_for_volume(
        &self,
        pair: &TradingPair,
        side: Side,
        base_volume: Volume,
    ) -> Result<Option<Price>, SourceError> {
        self.with_book(pair, |book| book.vwap_for_volume(side, base_volume))
    }
}
