//! REST depth-snapshot source.
//!
//! Fetches public order book snapshots in the widely used
//! `{"bids": [[price, qty], ..], "asks": [[price, qty], ..]}` shape and
//! answers price and depth queries from them.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::BookSource;
use crate::domain::{Book, Price, PriceLevel, Side, TradingPair, Volume};
use crate::error::SourceError;
use crate::port::{DepthSource, PriceSource};

/// Connection settings for a REST depth source.
#[derive(Debug, Clone, Deserialize)]
pub struct RestSourceConfig {
    /// Display name for logs.
    #[serde(default = "default_name")]
    pub name: String,
    /// API root, e.g. `https://api.binance.com`.
    pub base_url: String,
    /// Path of the depth endpoint under `base_url`.
    #[serde(default = "default_depth_path")]
    pub depth_path: String,
    /// Number of levels requested per side.
    #[serde(default = "default_depth_limit")]
    pub depth_limit: u32,
    /// Separator between base and quote in venue symbols (`""` gives `INJUSDT`).
    #[serde(default)]
    pub symbol_separator: String,
    /// How long a fetched book is reused before refetching. Must be positive.
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,
    /// Per-request timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_name() -> String {
    "rest".into()
}

fn default_depth_path() -> String {
    "/api/v3/depth".into()
}

const fn default_depth_limit() -> u32 {
    100
}

const fn default_cache_ttl_ms() -> u64 {
    1000
}

const fn default_timeout_ms() -> u64 {
    3000
}

impl RestSourceConfig {
    /// Config with defaults for everything but the URL.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            depth_path: default_depth_path(),
            depth_limit: default_depth_limit(),
            symbol_separator: String::new(),
            cache_ttl_ms: default_cache_ttl_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Full URL of the depth endpoint.
    pub fn depth_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)?.join(&self.depth_path)
    }

    /// Venue symbol for a pair.
    #[must_use]
    pub fn symbol(&self, pair: &TradingPair) -> String {
        format!("{}{}{}", pair.base(), self.symbol_separator, pair.quote())
    }
}

#[derive(Debug, Deserialize)]
struct DepthSnapshot {
    bids: Vec<(Decimal, Decimal)>,
    asks: Vec<(Decimal, Decimal)>,
}

impl From<DepthSnapshot> for Book {
    fn from(snapshot: DepthSnapshot) -> Self {
        let levels = |raw: Vec<(Decimal, Decimal)>| -> Vec<PriceLevel> {
            raw.into_iter()
                .map(|(price, size)| PriceLevel::new(price, size))
                .collect()
        };
        Book::with_levels(levels(snapshot.bids), levels(snapshot.asks))
    }
}

/// Depth source backed by a public REST endpoint.
///
/// Only [`mid_price`](PriceSource::mid_price) fetches, and only once the
/// cached book is older than `cache_ttl_ms`. Depth and VWAP queries read the
/// book loaded by the preceding price query, so every figure in a row comes
/// from the same snapshot. A depth query for a pair that was never priced
/// fails with [`SourceError::UnknownSymbol`].
pub struct RestBookSource {
    config: RestSourceConfig,
    url: Url,
    client: Client,
    books: BookSource,
    fetched_at: Mutex<HashMap<TradingPair, Instant>>,
}

impl RestBookSource {
    pub fn new(config: RestSourceConfig) -> crate::error::Result<Self> {
        let url = config.depth_url()?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(SourceError::from)?;
        let books = BookSource::new(config.name.clone());

        Ok(Self {
            config,
            url,
            client,
            books,
            fetched_at: Mutex::new(HashMap::new()),
        })
    }

    fn is_fresh(&self, pair: &TradingPair) -> bool {
        let ttl = Duration::from_millis(self.config.cache_ttl_ms);
        self.fetched_at
            .lock()
            .get(pair)
            .is_some_and(|at| at.elapsed() < ttl)
    }

    async fn refresh(&self, pair: &TradingPair) -> Result<(), SourceError> {
        if self.is_fresh(pair) {
            return Ok(());
        }

        let symbol = self.config.symbol(pair);
        debug!(source = %self.config.name, symbol = %symbol, "Fetching depth snapshot");

        let limit = self.config.depth_limit.to_string();
        let response = self
            .client
            .get(self.url.clone())
            .query(&[("symbol", symbol.as_str()), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Drop any stale book so the pair reads as unquoted.
            self.books.remove(pair);
            self.fetched_at.lock().remove(pair);
            return Err(SourceError::Status { symbol, status });
        }

        let body = response.bytes().await?;
        let snapshot: DepthSnapshot =
            serde_json::from_slice(&body).map_err(|e| SourceError::Decode {
                symbol: symbol.clone(),
                reason: e.to_string(),
            })?;

        self.books.update(pair.clone(), snapshot.into());
        self.fetched_at.lock().insert(pair.clone(), Instant::now());
        Ok(())
    }
}

#[async_trait]
impl PriceSource for RestBookSource {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn mid_price(&self, pair: &TradingPair) -> Result<Option<Price>, SourceError> {
        self.refresh(pair).await?;
        self.books.mid_price(pair).await
    }
}

#[async_trait]
impl DepthSource for RestBookSource {
    async fn base_volume_to_price(
        &self,
        pair: &TradingPair,
        side: Side,
        price: Price,
    ) -> Result<Volume, SourceError> {
        self.books.base_volume_to_price(pair, side, price).await
    }

    async fn vwap_for_volume(
        &self,
        pair: &TradingPair,
        side: Side,
        base_volume: Volume,
    ) -> Result<Option<Price>, SourceError> {
        self.books.vwap_for_volume(pair, side, base_volume).await
    }
}
