//! Alert rules evaluated against each metrics row.
//!
//! Built-in rules:
//!
//! - **LowAskLiquidity**: ask-side quote depth under a floor
//! - **LowBidLiquidity**: bid-side quote depth under a floor
//! - **ExcessivePriceDeviation**: monitored price too far from the oracle
//!
//! # Architecture
//!
//! Each rule implements the [`AlertRule`] trait, which defines:
//! - `name()` - Unique identifier for logging/config
//! - `is_match()` - Pure predicate over a row
//! - `describe()` - Message for a matching row
//!
//! The [`RuleEngine`] holds the registered rules and evaluates all of them,
//! in registration order, against a row.
//!
//! # Example
//!
//! ```
//! use marketwatch::domain::rule::{LiquidityConfig, LowAskLiquidity, RuleEngine};
//!
//! let mut engine = RuleEngine::new();
//! engine.register(Box::new(LowAskLiquidity::new(LiquidityConfig::default())));
//! assert_eq!(engine.len(), 1);
//! ```

mod deviation;
mod engine;
mod liquidity;

pub use deviation::{DeviationConfig, ExcessivePriceDeviation};
pub use engine::RuleEngine;
pub use liquidity::{LiquidityConfig, LowAskLiquidity, LowBidLiquidity};

use super::metrics::MetricsRow;
use crate::error::ConfigError;

/// A stateless check over one metrics row.
///
/// Rules must not depend on each other or on evaluation order. Thresholds
/// live in each rule's own config.
pub trait AlertRule: Send + Sync {
    /// Unique identifier for this rule.
    ///
    /// Used in configuration (`rules.enabled`, `alerts.urgent_rules`) and
    /// logging.
    fn name(&self) -> &'static str;

    /// Whether the row trips this rule.
    fn is_match(&self, row: &MetricsRow) -> bool;

    /// Message describing the anomaly, citing the tested field and the
    /// threshold. Only called when [`is_match`](Self::is_match) is true.
    fn describe(&self, row: &MetricsRow) -> String;

    /// Reject thresholds that make the rule meaningless.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}
