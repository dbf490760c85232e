//! Exchange-agnostic domain logic.

pub mod alert;
pub mod book;
pub mod error;
pub mod metrics;
pub mod money;
pub mod pair;
pub mod rule;

// Core domain types
pub use alert::{MatchResult, PairAlerts, RuleMatch};
pub use book::{Book, PriceLevel, Side};
pub use metrics::{pct_difference, MetricsRow, Snapshot};
pub use money::{Percent, Price, Volume};
pub use pair::{PairAliases, TradingPair};

// Rules
pub use rule::{AlertRule, RuleEngine};
