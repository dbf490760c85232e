//! Rule engine integration tests.

use marketwatch::domain::rule::{
    AlertRule, DeviationConfig, ExcessivePriceDeviation, LiquidityConfig, LowAskLiquidity,
};
use marketwatch::domain::{MetricsRow, RuleEngine};
use marketwatch::testkit::domain::row;
use rust_decimal_macros::dec;

#[test]
fn thin_ask_side_is_the_only_match() {
    let engine = RuleEngine::with_default_rules();
    let row = row("INJ-USDT")
        .ask_depth(dec!(999))
        .bid_depth(dec!(2000))
        .pct(dec!(0.1))
        .build();

    let matches = engine.evaluate(&row);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].rule, "low_ask_liquidity");
    assert!(matches[0].message.contains("999"));
    assert!(matches[0].message.contains("1000"));
}

#[test]
fn depth_at_threshold_does_not_match() {
    let engine = RuleEngine::with_default_rules();
    let row = row("INJ-USDT").ask_depth(dec!(1000)).build();

    assert!(engine
        .evaluate(&row)
        .iter()
        .all(|m| m.rule != "low_ask_liquidity"));
}

#[test]
fn deviation_is_strict_and_symmetric() {
    let rule = ExcessivePriceDeviation::new(DeviationConfig::default());

    assert!(rule.is_match(&row("SOL-USDT").pct(dec!(-0.6)).build()));
    assert!(rule.is_match(&row("SOL-USDT").pct(dec!(0.6)).build()));
    assert!(!rule.is_match(&row("SOL-USDT").pct(dec!(0.5)).build()));
    assert!(!rule.is_match(&row("SOL-USDT").pct(dec!(-0.5)).build()));
}

#[test]
fn deviation_message_uses_three_significant_digits() {
    let rule = ExcessivePriceDeviation::new(DeviationConfig::default());
    let row = row("SOL-USDT").pct(dec!(-0.61234)).build();

    assert_eq!(
        rule.describe(&row),
        "Price difference=-0.612% abs value is above 0.5%!"
    );
}

#[test]
fn every_rule_reports_in_registration_order() {
    let engine = RuleEngine::with_default_rules();
    let row = row("ARB-USDT")
        .ask_depth(dec!(10))
        .bid_depth(dec!(20))
        .pct(dec!(3))
        .build();

    let rules: Vec<_> = engine.evaluate(&row).into_iter().map(|m| m.rule).collect();
    assert_eq!(
        rules,
        vec![
            "low_ask_liquidity",
            "low_bid_liquidity",
            "excessive_price_deviation"
        ]
    );
}

#[test]
fn evaluate_all_skips_healthy_pairs_and_keeps_order() {
    let engine = RuleEngine::with_default_rules();
    let rows: Vec<MetricsRow> = vec![
        row("WETH-USDT").bid_depth(dec!(1)).build(),
        row("INJ-USDT").build(),
        row("TIA-USDT").pct(dec!(-2)).build(),
    ];

    let result = engine.evaluate_all(&rows);

    let pairs: Vec<_> = result.iter().map(|p| p.pair.to_string()).collect();
    assert_eq!(pairs, vec!["WETH-USDT", "TIA-USDT"]);
    assert_eq!(result[0].alerts[0].rule, "low_bid_liquidity");
    assert_eq!(result[1].alerts[0].rule, "excessive_price_deviation");
}

struct WideSpread;

impl AlertRule for WideSpread {
    fn name(&self) -> &'static str {
        "wide_spread"
    }

    fn is_match(&self, row: &MetricsRow) -> bool {
        row.monitored_price > row.oracle_price * dec!(2)
    }

    fn describe(&self, row: &MetricsRow) -> String {
        format!("Monitored price={} is double the oracle", row.monitored_price)
    }
}

#[test]
fn custom_rules_plug_in_without_engine_changes() {
    let mut engine = RuleEngine::new();
    engine.register(Box::new(LowAskLiquidity::new(LiquidityConfig {
        min_liquidity: dec!(50),
    })));
    engine.register(Box::new(WideSpread));

    let row = row("KAVA-USDT")
        .prices(dec!(1), dec!(3))
        .ask_depth(dec!(10))
        .build();

    let matches = engine.evaluate(&row);
    assert_eq!(engine.rule_names(), vec!["low_ask_liquidity", "wide_spread"]);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[1].message, "Monitored price=3 is double the oracle");
}
