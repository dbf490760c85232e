//! Price deviation rule.
//!
//! Flags pairs whose monitored mid price drifts too far from the oracle.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::AlertRule;
use crate::domain::metrics::MetricsRow;
use crate::domain::money::Percent;
use crate::error::ConfigError;

/// Threshold for [`ExcessivePriceDeviation`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviationConfig {
    /// Maximum tolerated absolute deviation, in percent (0.5 = half a percent).
    #[serde(default = "default_max_difference_pct")]
    pub max_difference_pct: Percent,
}

fn default_max_difference_pct() -> Percent {
    Decimal::new(5, 1) // 0.5
}

impl Default for DeviationConfig {
    fn default() -> Self {
        Self {
            max_difference_pct: default_max_difference_pct(),
        }
    }
}

impl DeviationConfig {
    /// A negative maximum would match every row.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_difference_pct < Percent::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "excessive_price_deviation.max_difference_pct",
                reason: format!("must be 0 or greater, got {}", self.max_difference_pct),
            });
        }
        Ok(())
    }
}

/// Absolute deviation from the oracle exceeds the configured maximum.
pub struct ExcessivePriceDeviation {
    config: DeviationConfig,
}

impl ExcessivePriceDeviation {
    #[must_use]
    pub const fn new(config: DeviationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &DeviationConfig {
        &self.config
    }
}

impl AlertRule for ExcessivePriceDeviation {
    fn name(&self) -> &'static str {
        "excessive_price_deviation"
    }

    fn is_match(&self, row: &MetricsRow) -> bool {
        row.pct_difference.abs() > self.config.max_difference_pct
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }

    fn describe(&self, row: &MetricsRow) -> String {
        let pct = row
            .pct_difference
            .round_sf(3)
            .unwrap_or(row.pct_difference)
            .normalize();
        format!(
            "Price difference={pct}% abs value is above {}%!",
            self.config.max_difference_pct.normalize()
        )
    }
}
