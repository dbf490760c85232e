//! Monitor loop integration tests.

use std::sync::Arc;
use std::time::Duration;

use marketwatch::domain::Side;
use marketwatch::port::{Clock, Notifier};
use marketwatch::runtime::{AlertRouting, MonitorLoop, MonitorState, MAX_INTERVAL};
use marketwatch::testkit::clock::ManualClock;
use marketwatch::testkit::notifier::{FailingNotifier, Posted, RecordingNotifier};
use marketwatch::testkit::source::ScriptedSource;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::watch;

/// A monitored source quoting `mid` with `base` units of depth on each side.
fn venue(quotes: &[(&str, Decimal, Decimal)]) -> ScriptedSource {
    quotes
        .iter()
        .fold(ScriptedSource::new("venue"), |source, (symbol, mid, base)| {
            source
                .with_mid(symbol, *mid)
                .with_depth(symbol, Side::Ask, *base, *mid)
                .with_depth(symbol, Side::Bid, *base, *mid)
        })
}

fn oracle(quotes: &[(&str, Decimal)]) -> ScriptedSource {
    quotes
        .iter()
        .fold(ScriptedSource::new("oracle"), |source, (symbol, mid)| {
            source.with_mid(symbol, *mid)
        })
}

fn monitor(
    pairs: &[&str],
    oracle: &ScriptedSource,
    venue: &ScriptedSource,
    notifier: Arc<dyn Notifier>,
) -> MonitorLoop {
    MonitorLoop::builder()
        .pairs(pairs.iter().copied())
        .interval(Duration::from_secs(5))
        .poll_interval(Duration::from_millis(10))
        .oracle(Arc::new(oracle.clone()))
        .monitored(Arc::new(venue.clone()))
        .notifier(notifier)
        .build()
        .expect("monitor should build")
}

#[tokio::test]
async fn ticks_inside_the_interval_do_not_resample() {
    let clock = ManualClock::new();
    let oracle = oracle(&[("INJ-USDT", dec!(20))]);
    let venue = venue(&[("INJ-USDT", dec!(20), dec!(100))]);
    let mut monitor = monitor(
        &["INJ-USDT"],
        &oracle,
        &venue,
        Arc::new(RecordingNotifier::new()),
    );

    monitor.tick(clock.now()).await;
    assert_eq!(oracle.mid_calls(), 1);
    assert_eq!(monitor.state(), MonitorState::Idle);
    assert_eq!(monitor.last_run(), Some(clock.now()));

    clock.advance(Duration::from_secs(4));
    monitor.tick(clock.now()).await;
    assert_eq!(oracle.mid_calls(), 1);

    clock.advance(Duration::from_secs(1));
    monitor.tick(clock.now()).await;
    assert_eq!(oracle.mid_calls(), 2);
}

#[tokio::test]
async fn longest_interval_ticks_without_overflow() {
    let clock = ManualClock::new();
    let oracle = oracle(&[("INJ-USDT", dec!(20))]);
    let venue = venue(&[("INJ-USDT", dec!(20), dec!(100))]);
    let mut monitor = MonitorLoop::builder()
        .pairs(["INJ-USDT"])
        .interval(MAX_INTERVAL)
        .oracle(Arc::new(oracle.clone()))
        .monitored(Arc::new(venue))
        .notifier(Arc::new(RecordingNotifier::new()))
        .build()
        .expect("monitor should build");

    monitor.tick(clock.now()).await;
    clock.advance(Duration::from_secs(1));
    monitor.tick(clock.now()).await;
    assert_eq!(oracle.mid_calls(), 1);

    clock.advance(MAX_INTERVAL);
    monitor.tick(clock.now()).await;
    assert_eq!(oracle.mid_calls(), 2);
}

#[tokio::test]
async fn each_match_is_posted_with_pair_prefix() {
    let clock = ManualClock::new();
    let notifier = RecordingNotifier::new();
    // 10 base at a VWAP of 20 is 200 quote on each side
    let oracle = oracle(&[("INJ-USDT", dec!(20))]);
    let venue = venue(&[("INJ-USDT", dec!(20), dec!(10))]);
    let mut monitor = monitor(&["INJ-USDT"], &oracle, &venue, Arc::new(notifier.clone()));

    monitor.tick(clock.now()).await;

    assert_eq!(
        notifier.texts(),
        vec![
            "Anomalies detected for INJ-USDT: Ask liquidity=200 is below 1000!",
            "Anomalies detected for INJ-USDT: Bid liquidity=200 is below 1000!",
        ]
    );
    assert!(notifier.posts().iter().all(|p| !p.urgent));
}

#[tokio::test]
async fn failed_post_does_not_stop_the_rest() {
    let clock = ManualClock::new();
    let notifier = FailingNotifier::failing_on([0]);
    // INJ is thin on both sides; SOL deviates by 1%.
    let oracle = oracle(&[("INJ-USDT", dec!(20)), ("SOL-USDT", dec!(100))]);
    let venue = venue(&[
        ("INJ-USDT", dec!(20), dec!(10)),
        ("SOL-USDT", dec!(101), dec!(1000)),
    ]);
    let mut monitor = monitor(
        &["INJ-USDT", "SOL-USDT"],
        &oracle,
        &venue,
        Arc::new(notifier.clone()),
    );

    monitor.tick(clock.now()).await;

    assert_eq!(notifier.attempts(), 3);
    assert_eq!(
        notifier.delivered().texts(),
        vec![
            "Anomalies detected for INJ-USDT: Bid liquidity=200 is below 1000!",
            "Anomalies detected for SOL-USDT: Price difference=1% abs value is above 0.5%!",
        ]
    );
}

#[tokio::test]
async fn snapshot_is_stable_between_ticks() {
    let clock = ManualClock::new();
    let oracle = oracle(&[("INJ-USDT", dec!(20))]);
    let venue = venue(&[("INJ-USDT", dec!(20), dec!(100))]);
    let mut monitor = monitor(
        &["INJ-USDT"],
        &oracle,
        &venue,
        Arc::new(RecordingNotifier::new()),
    );
    let handle = monitor.snapshot_handle();

    monitor.tick(clock.now()).await;
    let first = monitor.snapshot();
    let again = monitor.snapshot();
    assert!(Arc::ptr_eq(&first, &again));
    assert!(Arc::ptr_eq(&first, &handle.load()));
    assert_eq!(first.len(), 1);

    // Not due yet: still the same table.
    clock.advance(Duration::from_secs(1));
    monitor.tick(clock.now()).await;
    assert!(Arc::ptr_eq(&first, &monitor.snapshot()));

    clock.advance(Duration::from_secs(5));
    monitor.tick(clock.now()).await;
    assert!(!Arc::ptr_eq(&first, &monitor.snapshot()));
}

#[tokio::test]
async fn skipped_pairs_drop_out_of_the_snapshot() {
    let clock = ManualClock::new();
    let notifier = RecordingNotifier::new();
    let oracle = oracle(&[("SOL-USDT", dec!(100))]);
    let venue = venue(&[
        ("INJ-USDT", dec!(20), dec!(1000)),
        ("SOL-USDT", dec!(100), dec!(1000)),
    ]);
    let mut monitor = monitor(
        &["INJ-USDT", "SOL-USDT"],
        &oracle,
        &venue,
        Arc::new(notifier.clone()),
    );

    monitor.tick(clock.now()).await;

    let snapshot = monitor.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.rows()[0].trading_pair.as_str(), "SOL-USDT");
    assert!(notifier.is_empty());
}

#[tokio::test]
async fn skipped_pairs_can_be_reported() {
    let clock = ManualClock::new();
    let notifier = RecordingNotifier::new();
    let oracle = oracle(&[]);
    let venue = venue(&[("INJ-USDT", dec!(20), dec!(1000))]);
    let mut monitor = MonitorLoop::builder()
        .pairs(["INJ-USDT"])
        .oracle(Arc::new(oracle))
        .monitored(Arc::new(venue))
        .notifier(Arc::new(notifier.clone()))
        .routing(AlertRouting {
            notify_skipped_pairs: true,
            ..AlertRouting::default()
        })
        .build()
        .unwrap();

    monitor.tick(clock.now()).await;

    let posts = notifier.posts();
    assert_eq!(posts.len(), 1);
    assert!(posts[0].text.starts_with("Skipped INJ-USDT this tick"));
    assert!(!posts[0].urgent);
}

#[tokio::test]
async fn urgency_follows_configured_rules() {
    let clock = ManualClock::new();
    let notifier = RecordingNotifier::new();
    let oracle = oracle(&[("SOL-USDT", dec!(100))]);
    let venue = venue(&[("SOL-USDT", dec!(102), dec!(1))]);
    let mut monitor = MonitorLoop::builder()
        .pairs(["SOL-USDT"])
        .oracle(Arc::new(oracle))
        .monitored(Arc::new(venue))
        .notifier(Arc::new(notifier.clone()))
        .routing(AlertRouting {
            urgent_rules: ["excessive_price_deviation".to_string()].into_iter().collect(),
            notify_skipped_pairs: false,
        })
        .build()
        .unwrap();

    monitor.tick(clock.now()).await;

    let posts = notifier.posts();
    assert_eq!(posts.len(), 3);
    assert_eq!(
        posts.iter().map(|p| p.urgent).collect::<Vec<_>>(),
        vec![false, false, true]
    );
    assert_eq!(
        posts[2],
        Posted {
            text: "Anomalies detected for SOL-USDT: Price difference=2% abs value is above 0.5%!"
                .to_string(),
            urgent: true,
        }
    );
}

#[tokio::test]
async fn run_stops_on_shutdown_and_abandons_the_pass() {
    let notifier = RecordingNotifier::new();
    let oracle = oracle(&[("INJ-USDT", dec!(20))]).with_delay(Duration::from_secs(30));
    let venue = venue(&[("INJ-USDT", dec!(20), dec!(1))]);
    let monitor = monitor(&["INJ-USDT"], &oracle, &venue, Arc::new(notifier.clone()));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new());
    let task = tokio::spawn(monitor.run(clock, shutdown_rx));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(oracle.mid_calls(), 1);
    shutdown_tx.send(true).unwrap();

    tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("monitor should stop promptly")
        .unwrap();
    assert!(notifier.is_empty());
}

#[tokio::test]
async fn run_stops_when_sender_is_dropped() {
    let oracle = oracle(&[("INJ-USDT", dec!(20))]);
    let venue = venue(&[("INJ-USDT", dec!(20), dec!(5000))]);
    let monitor = monitor(
        &["INJ-USDT"],
        &oracle,
        &venue,
        Arc::new(RecordingNotifier::new()),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new());
    let task = tokio::spawn(monitor.run(clock, shutdown_rx));

    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(shutdown_tx);

    tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("monitor should stop promptly")
        .unwrap();
    // The manual clock never moved, so only the first pass ran.
    assert_eq!(oracle.mid_calls(), 1);
}
