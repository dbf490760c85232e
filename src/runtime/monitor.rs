//! The periodic monitor loop.
//!
//! [`MonitorLoop`] is a two-state machine (`Idle`, `Sampling`). Each call to
//! [`MonitorLoop::tick`] checks whether the interval has elapsed since the
//! last pass; if so it samples every pair, swaps in the new snapshot,
//! evaluates the rules and posts one message per match.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::sampler::{MetricsSampler, DEFAULT_DELTA_PCT};
use super::validate::{
    check_delta, check_period, check_urgent_rules, parse_aliases, parse_pairs, MAX_INTERVAL,
    MAX_POLL_INTERVAL,
};
use crate::domain::rule::{DeviationConfig, LiquidityConfig};
use crate::domain::{MatchResult, Percent, RuleEngine, Snapshot, TradingPair};
use crate::error::ConfigError;
use crate::port::{Clock, LogNotifier, MarketSource, Notifier, PriceSource};

/// Default time between sampling passes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Default period at which [`MonitorLoop::run`] checks whether a pass is due.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Where the loop is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Waiting for the next pass to become due.
    Idle,
    /// A sampling pass is in progress.
    Sampling,
}

/// Shared read handle on the latest snapshot.
///
/// The snapshot is replaced wholesale, so readers always see a complete
/// table.
#[derive(Clone)]
pub struct SnapshotHandle {
    inner: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotHandle {
    fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(Snapshot::empty()))),
        }
    }

    /// The last completed snapshot.
    #[must_use]
    pub fn load(&self) -> Arc<Snapshot> {
        Arc::clone(&self.inner.read())
    }

    fn replace(&self, snapshot: Arc<Snapshot>) {
        *self.inner.write() = snapshot;
    }
}

/// Alert routing options.
#[derive(Debug, Clone, Default)]
pub struct AlertRouting {
    /// Rules whose alerts are posted with `urgent = true`.
    pub urgent_rules: HashSet<String>,
    /// Also post a diagnostic for every pair skipped in a pass.
    pub notify_skipped_pairs: bool,
}

/// Periodic sampler and rule evaluator.
pub struct MonitorLoop {
    pairs: Vec<TradingPair>,
    interval: Duration,
    poll_interval: Duration,
    sampler: MetricsSampler,
    engine: RuleEngine,
    notifier: Arc<dyn Notifier>,
    routing: AlertRouting,
    state: MonitorState,
    last_run: Option<Instant>,
    snapshot: SnapshotHandle,
}

impl MonitorLoop {
    /// Create a builder. Construction performs no network calls.
    #[must_use]
    pub fn builder() -> MonitorLoopBuilder {
        MonitorLoopBuilder::new()
    }

    #[must_use]
    pub fn pairs(&self) -> &[TradingPair] {
        &self.pairs
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn state(&self) -> MonitorState {
        self.state
    }

    #[must_use]
    pub const fn last_run(&self) -> Option<Instant> {
        self.last_run
    }

    #[must_use]
    pub const fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// The last completed snapshot. Does not trigger sampling.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.load()
    }

    /// A cloneable handle for readers on other tasks.
    #[must_use]
    pub fn snapshot_handle(&self) -> SnapshotHandle {
        self.snapshot.clone()
    }

    /// Whether a pass is due at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_run {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Advance the state machine. Runs at most one full pass.
    pub async fn tick(&mut self, now: Instant) {
        if !self.is_due(now) {
            return;
        }

        self.state = MonitorState::Sampling;
        // Recorded up front so a slow pass does not cause immediate re-entry.
        self.last_run = Some(now);

        let report = self.sampler.sample(&self.pairs).await;
        debug!(
            sampled = report.rows.len(),
            skipped = report.skipped.len(),
            "Sampling pass complete"
        );

        if self.routing.notify_skipped_pairs {
            for error in &report.skipped {
                self.deliver(&format!("Skipped {} this tick: {error}", error.pair()), false);
            }
        }

        let snapshot = Arc::new(Snapshot::new(report.rows));
        self.snapshot.replace(Arc::clone(&snapshot));

        let matches = self.engine.evaluate_all(snapshot.rows());
        self.dispatch(&matches);

        self.state = MonitorState::Idle;
    }

    fn dispatch(&self, matches: &MatchResult) {
        for pair_alerts in matches {
            info!("{}: {}", pair_alerts.pair, pair_alerts.summary());

            for alert in &pair_alerts.alerts {
                let urgent = self.routing.urgent_rules.contains(alert.rule);
                let text = format!("Anomalies detected for {}: {}", pair_alerts.pair, alert.message);
                self.deliver(&text, urgent);
            }
        }
    }

    fn deliver(&self, text: &str, urgent: bool) {
        if let Err(e) = self.notifier.post(text, urgent) {
            warn!(error = %e, "Failed to post alert");
        }
    }

    /// Drive [`tick`](Self::tick) until `shutdown` is set or its sender is
    /// dropped.
    ///
    /// A shutdown that arrives mid-pass abandons the pass; nothing is posted
    /// after the signal is observed.
    pub async fn run(mut self, clock: Arc<dyn Clock>, mut shutdown: watch::Receiver<bool>) {
        let mut poll = tokio::time::interval(self.poll_interval);
        poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(
            pairs = self.pairs.len(),
            rules = self.engine.len(),
            interval_secs = self.interval.as_secs_f64(),
            "Monitor started"
        );

        loop {
            tokio::select! {
                () = stop_requested(&mut shutdown) => {
                    info!("Shutdown signal received");
                    break;
                }
                _ = poll.tick() => {
                    let now = clock.now();
                    tokio::select! {
                        biased;
                        () = stop_requested(&mut shutdown) => {
                            info!("Shutdown signal received, abandoning sampling pass");
                            break;
                        }
                        () = self.tick(now) => {}
                    }
                }
            }
        }

        info!("Monitor stopped");
    }
}

/// Resolves once the flag is `true` or the sender is gone.
async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

/// Builder for [`MonitorLoop`]; validates everything in [`build`](Self::build).
pub struct MonitorLoopBuilder {
    pairs: Vec<String>,
    aliases: Vec<(String, String)>,
    interval: Duration,
    poll_interval: Duration,
    delta_pct: Percent,
    engine: Option<RuleEngine>,
    oracle: Option<Arc<dyn PriceSource>>,
    monitored: Option<Arc<dyn MarketSource>>,
    notifier: Option<Arc<dyn Notifier>>,
    routing: AlertRouting,
}

impl Default for MonitorLoopBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorLoopBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pairs: Vec::new(),
            aliases: Vec::new(),
            interval: DEFAULT_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            delta_pct: DEFAULT_DELTA_PCT,
            engine: None,
            oracle: None,
            monitored: None,
            notifier: None,
            routing: AlertRouting::default(),
        }
    }

    /// Pairs to track, in evaluation order.
    #[must_use]
    pub fn pairs<I, S>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pairs = pairs.into_iter().map(Into::into).collect();
        self
    }

    /// Map a monitored pair to the symbol used on the oracle.
    #[must_use]
    pub fn alias(mut self, monitored: impl Into<String>, oracle: impl Into<String>) -> Self {
        self.aliases.push((monitored.into(), oracle.into()));
        self
    }

    #[must_use]
    pub const fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub const fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Band around the monitored price used for depth, in percent.
    #[must_use]
    pub const fn delta_pct(mut self, delta_pct: Percent) -> Self {
        self.delta_pct = delta_pct;
        self
    }

    /// Use the built-in rules with the given thresholds. Negative thresholds
    /// are rejected by [`build`](Self::build).
    #[must_use]
    pub fn thresholds(self, liquidity: LiquidityConfig, deviation: DeviationConfig) -> Self {
        use crate::domain::rule::{ExcessivePriceDeviation, LowAskLiquidity, LowBidLiquidity};

        self.engine(RuleEngine::from_rules(vec![
            Box::new(LowAskLiquidity::new(liquidity.clone())),
            Box::new(LowBidLiquidity::new(liquidity)),
            Box::new(ExcessivePriceDeviation::new(deviation)),
        ]))
    }

    /// Use a custom rule engine. Defaults to [`RuleEngine::with_default_rules`].
    #[must_use]
    pub fn engine(mut self, engine: RuleEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    #[must_use]
    pub fn oracle(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.oracle = Some(source);
        self
    }

    #[must_use]
    pub fn monitored(mut self, source: Arc<dyn MarketSource>) -> Self {
        self.monitored = Some(source);
        self
    }

    /// Defaults to [`LogNotifier`].
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn routing(mut self, routing: AlertRouting) -> Self {
        self.routing = routing;
        self
    }

    /// Validate settings and assemble the loop.
    pub fn build(self) -> Result<MonitorLoop, ConfigError> {
        let pairs = parse_pairs(&self.pairs)?;
        let aliases = parse_aliases(
            self.aliases
                .iter()
                .map(|(monitored, oracle)| (monitored.as_str(), oracle.as_str())),
        )?;
        check_period("interval", self.interval, MAX_INTERVAL)?;
        check_period("poll_interval", self.poll_interval, MAX_POLL_INTERVAL)?;
        check_delta(self.delta_pct)?;

        let oracle = self
            .oracle
            .ok_or(ConfigError::MissingField { field: "oracle" })?;
        let monitored = self
            .monitored
            .ok_or(ConfigError::MissingField { field: "monitored" })?;
        let engine = self.engine.unwrap_or_else(RuleEngine::with_default_rules);
        engine.validate()?;
        check_urgent_rules(
            self.routing.urgent_rules.iter().map(String::as_str),
            &engine.rule_names(),
        )?;

        Ok(MonitorLoop {
            pairs,
            interval: self.interval,
            poll_interval: self.poll_interval,
            sampler: MetricsSampler::new(oracle, monitored, aliases, self.delta_pct),
            engine,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(LogNotifier)),
            routing: self.routing,
            state: MonitorState::Idle,
            last_run: None,
            snapshot: SnapshotHandle::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::source::BookSource;
    use rust_decimal_macros::dec;

    fn builder() -> MonitorLoopBuilder {
        let source = Arc::new(BookSource::new("books"));
        MonitorLoop::builder()
            .pairs(["INJ-USDT", "SOL-USDT"])
            .oracle(source.clone())
            .monitored(source)
    }

    #[test]
    fn builds_with_defaults() {
        let monitor = builder().build().unwrap();
        assert_eq!(monitor.pairs().len(), 2);
        assert_eq!(monitor.interval(), DEFAULT_INTERVAL);
        assert_eq!(monitor.state(), MonitorState::Idle);
        assert_eq!(monitor.engine().len(), 3);
        assert!(monitor.snapshot().is_empty());
    }

    #[test]
    fn rejects_bad_pairs() {
        assert!(matches!(
            builder().pairs(Vec::<String>::new()).build(),
            Err(ConfigError::InvalidValue { field: "pairs", .. })
        ));
        assert!(matches!(
            builder().pairs(["INJ-USDT", "inj-usdt"]).build(),
            Err(ConfigError::InvalidValue { field: "pairs", .. })
        ));
        assert!(matches!(
            builder().pairs(["INJUSDT"]).build(),
            Err(ConfigError::InvalidValue { field: "pairs", .. })
        ));
    }

    #[test]
    fn rejects_zero_interval_and_bad_delta() {
        assert!(matches!(
            builder().interval(Duration::ZERO).build(),
            Err(ConfigError::InvalidValue { field: "interval", .. })
        ));
        assert!(matches!(
            builder().delta_pct(dec!(0)).build(),
            Err(ConfigError::InvalidValue { field: "top_price_delta_pct", .. })
        ));
        assert!(matches!(
            builder().delta_pct(dec!(100)).build(),
            Err(ConfigError::InvalidValue { field: "top_price_delta_pct", .. })
        ));
    }

    #[test]
    fn rejects_unbounded_intervals() {
        assert!(matches!(
            builder().interval(Duration::MAX).build(),
            Err(ConfigError::InvalidValue { field: "interval", .. })
        ));
        assert!(matches!(
            builder().poll_interval(MAX_POLL_INTERVAL + Duration::from_secs(1)).build(),
            Err(ConfigError::InvalidValue { field: "poll_interval", .. })
        ));
        assert!(builder().interval(MAX_INTERVAL).build().is_ok());
    }

    #[test]
    fn rejects_negative_thresholds() {
        let thin = LiquidityConfig {
            min_liquidity: dec!(-1),
        };
        assert!(matches!(
            builder().thresholds(thin, DeviationConfig::default()).build(),
            Err(ConfigError::InvalidValue {
                field: "low_ask_liquidity.min_liquidity",
                ..
            })
        ));

        let loose = DeviationConfig {
            max_difference_pct: dec!(-0.5),
        };
        assert!(matches!(
            builder().thresholds(LiquidityConfig::default(), loose).build(),
            Err(ConfigError::InvalidValue {
                field: "excessive_price_deviation.max_difference_pct",
                ..
            })
        ));
    }

    #[test]
    fn rejects_missing_sources() {
        assert!(matches!(
            MonitorLoop::builder().pairs(["INJ-USDT"]).build(),
            Err(ConfigError::MissingField { field: "oracle" })
        ));
    }

    #[test]
    fn rejects_unknown_urgent_rule() {
        let routing = AlertRouting {
            urgent_rules: ["no_such_rule".to_string()].into_iter().collect(),
            notify_skipped_pairs: false,
        };
        assert!(matches!(
            builder().routing(routing).build(),
            Err(ConfigError::InvalidValue { field: "urgent_rules", .. })
        ));
    }

    #[test]
    fn due_only_after_interval() {
        let mut monitor = builder().build().unwrap();
        let start = Instant::now();
        assert!(monitor.is_due(start));

        monitor.last_run = Some(start);
        assert!(!monitor.is_due(start + Duration::from_secs(4)));
        assert!(monitor.is_due(start + DEFAULT_INTERVAL));
    }

    #[test]
    fn due_check_does_not_overflow() {
        let mut monitor = builder().build().unwrap();
        let start = Instant::now();
        monitor.interval = Duration::MAX;
        monitor.last_run = Some(start);

        assert!(!monitor.is_due(start + Duration::from_secs(1)));

        monitor.interval = DEFAULT_INTERVAL;
        if let Some(earlier) = start.checked_sub(Duration::from_secs(1)) {
            assert!(!monitor.is_due(earlier));
        }
    }
}
