//! Programmable market data source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::domain::pair;
use crate::domain::{Price, Side, TradingPair, Volume};
use crate::error::SourceError;
use crate::port::{DepthSource, PriceSource};

#[derive(Debug, Clone, Default)]
struct Script {
    mid: Option<Price>,
    depth: HashMap<Side, (Volume, Option<Price>)>,
    fail: bool,
}

/// A source whose answers are set per pair.
///
/// Unscripted pairs have no mid price and zero depth. Clones share state
/// and call counters.
#[derive(Clone)]
pub struct ScriptedSource {
    name: String,
    scripts: Arc<Mutex<HashMap<TradingPair, Script>>>,
    delay: Option<Duration>,
    mid_calls: Arc<AtomicUsize>,
    depth_calls: Arc<AtomicUsize>,
    vwap_calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scripts: Arc::new(Mutex::new(HashMap::new())),
            delay: None,
            mid_calls: Arc::new(AtomicUsize::new(0)),
            depth_calls: Arc::new(AtomicUsize::new(0)),
            vwap_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sleep this long before answering a mid price query.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_mid(self, symbol: &str, price: Price) -> Self {
        self.set_mid(symbol, Some(price));
        self
    }

    /// Base depth up to the trigger price and the VWAP for that volume.
    pub fn with_depth(self, symbol: &str, side: Side, base: Volume, vwap: Price) -> Self {
        self.script(symbol).depth.insert(side, (base, Some(vwap)));
        self
    }

    /// Base depth with no VWAP available.
    pub fn with_depth_no_vwap(self, symbol: &str, side: Side, base: Volume) -> Self {
        self.script(symbol).depth.insert(side, (base, None));
        self
    }

    /// Every query for the pair returns an error.
    pub fn with_failure(self, symbol: &str) -> Self {
        self.script(symbol).fail = true;
        self
    }

    pub fn set_mid(&self, symbol: &str, price: Option<Price>) {
        self.script(symbol).mid = price;
    }

    pub fn mid_calls(&self) -> usize {
        self.mid_calls.load(Ordering::SeqCst)
    }

    pub fn depth_calls(&self) -> usize {
        self.depth_calls.load(Ordering::SeqCst)
    }

    pub fn vwap_calls(&self) -> usize {
        self.vwap_calls.load(Ordering::SeqCst)
    }

    fn script(&self, symbol: &str) -> parking_lot::MappedMutexGuard<'_, Script> {
        parking_lot::MutexGuard::map(self.scripts.lock(), |scripts| {
            scripts.entry(pair(symbol)).or_default()
        })
    }

    fn lookup(&self, pair: &TradingPair) -> Result<Script, SourceError> {
        let script = self.scripts.lock().get(pair).cloned().unwrap_or_default();
        if script.fail {
            return Err(SourceError::UnknownSymbol(pair.to_string()));
        }
        Ok(script)
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn mid_price(&self, pair: &TradingPair) -> Result<Option<Price>, SourceError> {
        self.mid_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.lookup(pair)?.mid)
    }
}

#[async_trait]
impl DepthSource for ScriptedSource {
    async fn base_volume_to_price(
        &self,
        pair: &TradingPair,
        side: Side,
        _price: Price,
    ) -> Result<Volume, SourceError> {
        self.depth_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.lookup(pair)?;
        Ok(script
            .depth
            .get(&side)
            .map_or(Volume::ZERO, |(base, _)| *base))
    }

    async fn vwap_for_volume(
        &self,
        pair: &TradingPair,
        side: Side,
        _base_volume: Volume,
    ) -> Result<Option<Price>, SourceError> {
        self.vwap_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.lookup(pair)?;
        Ok(script.depth.get(&side).and_then(|(_, vwap)| *vwap))
    }
}
