//! Rule match results.

use serde::Serialize;

use super::pair::TradingPair;

/// A single rule that matched a metrics row, with its rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    /// Name of the rule that matched.
    pub rule: &'static str,
    /// Human-readable description of the anomaly.
    pub message: String,
}

/// All matches for one trading pair, in rule evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairAlerts {
    pub pair: TradingPair,
    pub alerts: Vec<RuleMatch>,
}

impl PairAlerts {
    /// Messages joined the way they are written to the log.
    #[must_use]
    pub fn summary(&self) -> String {
        self.alerts
            .iter()
            .map(|a| a.message.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Per-tick evaluation output, ordered by configured pair order.
pub type MatchResult = Vec<PairAlerts>;
