//! Monitor loop factory.

use std::sync::Arc;

use super::source::Sources;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::Notifier;
use crate::runtime::MonitorLoop;

/// Assemble a [`MonitorLoop`] from configuration and already-built ports.
pub fn build_monitor(
    config: &Config,
    sources: Sources,
    notifier: Arc<dyn Notifier>,
) -> Result<MonitorLoop> {
    let monitor = &config.monitor;

    let builder = monitor.oracle_aliases.iter().fold(
        MonitorLoop::builder()
            .pairs(monitor.pairs.iter().cloned())
            .interval(monitor.interval())
            .poll_interval(monitor.poll_interval())
            .delta_pct(monitor.top_price_delta_pct),
        |builder, (from, to)| builder.alias(from.clone(), to.clone()),
    );

    let monitor_loop = builder
        .engine(config.rules.build_engine()?)
        .oracle(sources.oracle)
        .monitored(sources.monitored)
        .notifier(notifier)
        .routing(config.alerts.routing())
        .build()?;

    Ok(monitor_loop)
}
