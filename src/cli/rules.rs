//! Handler for the `rules` command.

use tabled::{Table, Tabled};

use crate::cli::output;
use crate::infrastructure::config::rules::RulesConfig;

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Condition")]
    condition: &'static str,
    #[tabled(rename = "Default")]
    threshold: String,
}

fn rows() -> Vec<RuleRow> {
    let defaults = RulesConfig::default();
    vec![
        RuleRow {
            name: "low_ask_liquidity",
            condition: "ask depth (quote) < min_liquidity",
            threshold: format!(
                "min_liquidity = {}",
                defaults.low_ask_liquidity.min_liquidity.normalize()
            ),
        },
        RuleRow {
            name: "low_bid_liquidity",
            condition: "bid depth (quote) < min_liquidity",
            threshold: format!(
                "min_liquidity = {}",
                defaults.low_bid_liquidity.min_liquidity.normalize()
            ),
        },
        RuleRow {
            name: "excessive_price_deviation",
            condition: "|% diff vs oracle| > max_difference_pct",
            threshold: format!(
                "max_difference_pct = {}",
                defaults
                    .excessive_price_deviation
                    .max_difference_pct
                    .normalize()
            ),
        },
    ]
}

/// List the built-in rules in default evaluation order.
pub fn execute() {
    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Built-in rules");
    output::block(&Table::new(rows()).to_string());
    output::note("Enable and tune rules in the [rules] section of config.toml");
}
