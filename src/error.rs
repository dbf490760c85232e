use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::book::Side;
use crate::domain::error::DomainError;
use crate::domain::pair::TradingPair;

/// Configuration-related errors with structured variants.
///
/// All of these are fatal: they are raised before the monitor starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by market data adapters.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} for {symbol}")]
    Status {
        symbol: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response for {symbol}: {reason}")]
    Decode { symbol: String, reason: String },

    #[error("no market data for {0}")]
    UnknownSymbol(String),

    #[error("invalid order book for {symbol}: {error}")]
    InvalidBook {
        symbol: String,
        #[source]
        error: DomainError,
    },
}

/// Per-pair data errors. The pair is skipped for the current tick only.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("{source_name} returned no quote for {pair}")]
    MissingQuote {
        pair: TradingPair,
        source_name: String,
    },

    #[error("oracle price {price} for {pair} is not positive")]
    InvalidOraclePrice { pair: TradingPair, price: Decimal },

    #[error("{side} depth for {pair} is negative: {volume}")]
    InvalidDepth {
        pair: TradingPair,
        side: Side,
        volume: Decimal,
    },

    #[error("{source_name} query for {pair} failed: {error}")]
    SourceFailure {
        pair: TradingPair,
        source_name: String,
        #[source]
        error: SourceError,
    },

    #[error("arithmetic overflow computing {field} for {pair}")]
    Arithmetic {
        pair: TradingPair,
        field: &'static str,
    },
}

impl MonitorError {
    /// The pair this error applies to.
    #[must_use]
    pub const fn pair(&self) -> &TradingPair {
        match self {
            Self::MissingQuote { pair, .. }
            | Self::InvalidOraclePrice { pair, .. }
            | Self::InvalidDepth { pair, .. }
            | Self::SourceFailure { pair, .. }
            | Self::Arithmetic { pair, .. } => pair,
        }
    }
}

/// Notification delivery errors. Logged and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("{notifier} notifier channel closed")]
    ChannelClosed { notifier: &'static str },

    #[error("{notifier} rejected message: {reason}")]
    Rejected {
        notifier: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
