use super::{
    AlertRule, DeviationConfig, ExcessivePriceDeviation, LiquidityConfig, LowAskLiquidity,
    LowBidLiquidity,
};
use crate::domain::alert::{MatchResult, PairAlerts, RuleMatch};
use crate::domain::metrics::MetricsRow;
use crate::error::ConfigError;

/// Ordered registry of alert rules.
///
/// Rules are evaluated in registration order and every rule is evaluated
/// for every row; a match never short-circuits the rest.
#[derive(Default)]
pub struct RuleEngine {
    rules: Vec<Box<dyn AlertRule>>,
}

impl RuleEngine {
    /// Create a new empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with the built-in rules at their reference thresholds.
    #[must_use]
    pub fn with_default_rules() -> Self {
        Self::from_rules(vec![
            Box::new(LowAskLiquidity::new(LiquidityConfig::default())),
            Box::new(LowBidLiquidity::new(LiquidityConfig::default())),
            Box::new(ExcessivePriceDeviation::new(DeviationConfig::default())),
        ])
    }

    #[must_use]
    pub fn from_rules(rules: Vec<Box<dyn AlertRule>>) -> Self {
        Self { rules }
    }

    /// Register a rule.
    ///
    /// Rules are evaluated in registration order.
    pub fn register(&mut self, rule: Box<dyn AlertRule>) {
        self.rules.push(rule);
    }

    /// Get all registered rules.
    #[must_use]
    pub fn rules(&self) -> &[Box<dyn AlertRule>] {
        &self.rules
    }

    /// Names of the registered rules, in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validate every registered rule's thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.iter().try_for_each(|rule| rule.validate())
    }

    /// Run every rule against `row` and describe the ones that match.
    #[must_use]
    pub fn evaluate(&self, row: &MetricsRow) -> Vec<RuleMatch> {
        self.rules
            .iter()
            .filter(|rule| rule.is_match(row))
            .map(|rule| RuleMatch {
                rule: rule.name(),
                message: rule.describe(row),
            })
            .collect()
    }

    /// Evaluate a whole table, keeping only pairs with at least one match.
    #[must_use]
    pub fn evaluate_all(&self, rows: &[MetricsRow]) -> MatchResult {
        rows.iter()
            .filter_map(|row| {
                let alerts = self.evaluate(row);
                (!alerts.is_empty()).then(|| PairAlerts {
                    pair: row.trading_pair.clone(),
                    alerts,
                })
            })
            .collect()
    }
}
