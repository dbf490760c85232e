//! Checks shared by [`MonitorLoopBuilder`](super::MonitorLoopBuilder) and
//! the configuration loader.

use std::collections::HashSet;
use std::time::Duration;

use crate::domain::{PairAliases, Percent, TradingPair};
use crate::error::ConfigError;

/// Longest accepted time between sampling passes.
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Longest accepted period between due checks in [`MonitorLoop::run`](super::MonitorLoop::run).
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// `value` must be positive and no longer than `max`.
pub(crate) fn check_period(
    field: &'static str,
    value: Duration,
    max: Duration,
) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }
    if value > max {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be at most {}s", max.as_secs()),
        });
    }
    Ok(())
}

pub(crate) fn check_delta(delta_pct: Percent) -> Result<(), ConfigError> {
    if delta_pct <= Percent::ZERO || delta_pct >= Percent::ONE_HUNDRED {
        return Err(ConfigError::InvalidValue {
            field: "top_price_delta_pct",
            reason: format!("must be between 0 and 100 exclusive, got {delta_pct}"),
        });
    }
    Ok(())
}

pub(crate) fn parse_pair(field: &'static str, raw: &str) -> Result<TradingPair, ConfigError> {
    TradingPair::parse(raw).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })
}

/// Parse a non-empty list of distinct pairs, keeping order.
pub(crate) fn parse_pairs<S: AsRef<str>>(raw: &[S]) -> Result<Vec<TradingPair>, ConfigError> {
    if raw.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "pairs",
            reason: "at least one trading pair is required".to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut pairs = Vec::with_capacity(raw.len());
    for value in raw {
        let pair = parse_pair("pairs", value.as_ref())?;
        if !seen.insert(pair.clone()) {
            return Err(ConfigError::InvalidValue {
                field: "pairs",
                reason: format!("duplicate trading pair {pair}"),
            });
        }
        pairs.push(pair);
    }
    Ok(pairs)
}

pub(crate) fn parse_aliases<'a, I>(raw: I) -> Result<PairAliases, ConfigError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    raw.into_iter()
        .map(|(monitored, oracle)| {
            Ok((
                parse_pair("oracle_aliases", monitored)?,
                parse_pair("oracle_aliases", oracle)?,
            ))
        })
        .collect()
}

/// Every urgent rule must be one of the enabled rules.
pub(crate) fn check_urgent_rules<'a, I>(urgent: I, enabled: &[&str]) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    match urgent.into_iter().find(|name| !enabled.contains(name)) {
        Some(unknown) => Err(ConfigError::InvalidValue {
            field: "urgent_rules",
            reason: format!("rule '{unknown}' is not enabled"),
        }),
        None => Ok(()),
    }
}
