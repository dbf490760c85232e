//! Marketwatch - periodic market anomaly monitor.
//!
//! Samples mid prices and order-book depth for a fixed set of trading pairs
//! from a monitored venue and a reference oracle, evaluates pluggable alert
//! rules against the derived metrics, and posts a message for every match.
//!
//! # Architecture
//!
//! - **`domain`** - Pairs, books, metrics rows and the rule engine
//!   - `LowAskLiquidity` / `LowBidLiquidity` - thin book within the price band
//!   - `ExcessivePriceDeviation` - venue drifts from the oracle
//! - **`port`** - Traits for data sources, notifiers and the clock
//! - **`adapter`** - REST and in-memory sources, Slack and Telegram notifiers
//! - **`runtime`** - `MetricsSampler`, `MonitorLoop` and status rendering
//! - **`infrastructure`** - Configuration, logging and factories
//! - **`cli`** - Command-line handlers
//!
//! # Features
//!
//! - `telegram` - Telegram notifier (default)
//! - `testkit` - Scripted sources and recording notifiers for tests
//!
//! # Example
//!
//! ```
//! use marketwatch::domain::rule::{LiquidityConfig, LowAskLiquidity};
//! use marketwatch::domain::RuleEngine;
//!
//! let mut engine = RuleEngine::new();
//! engine.register(Box::new(LowAskLiquidity::new(LiquidityConfig::default())));
//! assert_eq!(engine.rule_names(), vec!["low_ask_liquidity"]);
//! ```

pub mod adapter;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
pub mod runtime;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
