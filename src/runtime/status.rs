//! Status table rendering for the latest snapshot.

use rust_decimal::Decimal;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::domain::{MetricsRow, Percent, Snapshot};

fn depth(value: Decimal) -> String {
    value.round_dp(5).normalize().to_string()
}

fn row_cells(row: &MetricsRow) -> [String; 6] {
    [
        row.trading_pair.to_string(),
        depth(row.oracle_price),
        depth(row.monitored_price),
        format!("{}%", row.pct_difference.round_dp(3).normalize()),
        depth(row.ask_depth_quote),
        depth(row.bid_depth_quote),
    ]
}

/// Render `snapshot` as a table, one line per row.
#[must_use]
pub fn render_status(snapshot: &Snapshot, delta_pct: Percent) -> String {
    let delta = delta_pct.normalize();

    let mut builder = Builder::default();
    builder.push_record([
        "Trading Pair".to_string(),
        "Oracle Price".to_string(),
        "Monitored Price".to_string(),
        "% Diff".to_string(),
        format!("Ask Depth +{delta}%"),
        format!("Bid Depth -{delta}%"),
    ]);
    for row in snapshot.rows() {
        builder.push_record(row_cells(row));
    }

    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}
