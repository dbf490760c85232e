//! Rule selection and thresholds.

use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::rule::{
    AlertRule, DeviationConfig, ExcessivePriceDeviation, LiquidityConfig, LowAskLiquidity,
    LowBidLiquidity,
};
use crate::domain::RuleEngine;
use crate::error::ConfigError;

const LOW_ASK_LIQUIDITY: &str = "low_ask_liquidity";
const LOW_BID_LIQUIDITY: &str = "low_bid_liquidity";
const EXCESSIVE_PRICE_DEVIATION: &str = "excessive_price_deviation";

/// Names of every built-in rule, in default evaluation order.
pub const BUILTIN_RULES: &[&str] = &[
    LOW_ASK_LIQUIDITY,
    LOW_BID_LIQUIDITY,
    EXCESSIVE_PRICE_DEVIATION,
];

/// Which rules run, in which order, and their thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    /// Enabled rules in evaluation order.
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,

    #[serde(default)]
    pub low_ask_liquidity: LiquidityConfig,

    #[serde(default)]
    pub low_bid_liquidity: LiquidityConfig,

    #[serde(default)]
    pub excessive_price_deviation: DeviationConfig,
}

fn default_enabled() -> Vec<String> {
    BUILTIN_RULES.iter().map(|r| (*r).to_string()).collect()
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            low_ask_liquidity: LiquidityConfig::default(),
            low_bid_liquidity: LiquidityConfig::default(),
            excessive_price_deviation: DeviationConfig::default(),
        }
    }
}

impl RulesConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "rules.enabled",
                reason: "at least one rule must be enabled".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for name in &self.enabled {
            if !BUILTIN_RULES.contains(&name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "rules.enabled",
                    reason: format!(
                        "unknown rule '{name}', expected one of: {}",
                        BUILTIN_RULES.join(", ")
                    ),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "rules.enabled",
                    reason: format!("rule '{name}' listed twice"),
                });
            }
        }

        self.low_ask_liquidity.validate("low_ask_liquidity.min_liquidity")?;
        self.low_bid_liquidity.validate("low_bid_liquidity.min_liquidity")?;
        self.excessive_price_deviation.validate()
    }

    /// Instantiate the enabled rules in listed order.
    pub fn build_engine(&self) -> Result<RuleEngine, ConfigError> {
        let mut engine = RuleEngine::new();
        for name in &self.enabled {
            engine.register(self.build_rule(name)?);
        }
        Ok(engine)
    }

    fn build_rule(&self, name: &str) -> Result<Box<dyn AlertRule>, ConfigError> {
        let rule: Box<dyn AlertRule> = match name {
            LOW_ASK_LIQUIDITY => Box::new(LowAskLiquidity::new(self.low_ask_liquidity.clone())),
            LOW_BID_LIQUIDITY => Box::new(LowBidLiquidity::new(self.low_bid_liquidity.clone())),
            EXCESSIVE_PRICE_DEVIATION => Box::new(ExcessivePriceDeviation::new(
                self.excessive_price_deviation.clone(),
            )),
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "rules.enabled",
                    reason: format!("unknown rule '{other}'"),
                })
            }
        };
        Ok(rule)
    }
}
