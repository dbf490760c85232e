//! Trading pair identifiers and the oracle alias table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A `BASE-QUOTE` trading pair such as `INJ-USDT`.
///
/// Construction goes through [`TradingPair::parse`], which upper-cases the
/// input and checks that both assets are present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TradingPair {
    symbol: String,
    split: usize,
}

impl TradingPair {
    /// Parse a pair from `BASE-QUOTE` notation.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        let invalid = |reason| DomainError::InvalidPair {
            value: value.to_string(),
            reason,
        };

        let mut parts = trimmed.split('-');
        let (Some(base), Some(quote), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid("expected exactly one '-' separator"));
        };
        if base.is_empty() || quote.is_empty() {
            return Err(invalid("base and quote assets must be non-empty"));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(invalid("only ASCII letters and digits are allowed"));
        }

        Ok(Self {
            symbol: trimmed.to_ascii_uppercase(),
            split: base.len(),
        })
    }

    /// The base asset, e.g. `INJ`.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.symbol[..self.split]
    }

    /// The quote asset, e.g. `USDT`.
    #[must_use]
    pub fn quote(&self) -> &str {
        &self.symbol[self.split + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.symbol
    }

    /// Exchange symbol with the separator removed, e.g. `INJUSDT`.
    #[must_use]
    pub fn compact(&self) -> String {
        format!("{}{}", self.base(), self.quote())
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

impl FromStr for TradingPair {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TradingPair {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TradingPair> for String {
    fn from(pair: TradingPair) -> Self {
        pair.symbol
    }
}

/// Maps a monitored pair to the symbol quoted by the oracle source.
///
/// Pairs without an entry are identity-mapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairAliases {
    aliases: HashMap<TradingPair, TradingPair>,
}

impl PairAliases {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an alias.
    pub fn insert(&mut self, monitored: TradingPair, oracle: TradingPair) {
        self.aliases.insert(monitored, oracle);
    }

    /// Resolve the oracle-side pair for a monitored pair.
    #[must_use]
    pub fn resolve<'a>(&'a self, pair: &'a TradingPair) -> &'a TradingPair {
        self.aliases.get(pair).unwrap_or(pair)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl FromIterator<(TradingPair, TradingPair)> for PairAliases {
    fn from_iter<I: IntoIterator<Item = (TradingPair, TradingPair)>>(iter: I) -> Self {
        Self {
            aliases: iter.into_iter().collect(),
        }
    }
}
