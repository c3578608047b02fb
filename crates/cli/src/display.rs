use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;

use portfolio_tracker_core::models::report::GainLossRow;
use portfolio_tracker_core::PortfolioTracker;

/// Render the current holdings, total value, and session transaction log.
pub fn portfolio(tracker: &PortfolioTracker) {
    println!("\n{}", "Portfolio".bold());

    if tracker.stocks().is_empty() {
        println!("  (no holdings)");
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Symbol", "Shares", "Cost/Share", "Total Cost"]);

        for stock in tracker.stocks() {
            table.add_row(vec![
                stock.symbol.clone(),
                stock.shares.to_string(),
                format!("${:.2}", stock.cost_per_share),
                format!("${:.2}", stock.total_cost()),
            ]);
        }
        println!("{table}");
    }

    println!(
        "Total portfolio value: {}",
        format!("${:.2}", tracker.portfolio_value()).bold()
    );

    println!("\nTransactions entered in current session:");
    if tracker.transactions().is_empty() {
        println!("  (none)");
    } else {
        for transaction in tracker.transactions() {
            println!("  {transaction}");
        }
    }
}

/// Render the gain/loss report as a table.
///
/// Rows whose price lookup failed show `n/a` instead of the sentinel
/// arithmetic; the report file keeps the raw sentinel values.
pub fn gain_loss_report(rows: &[GainLossRow]) {
    println!("\n{}", "Gain/Loss Report".bold());

    if rows.is_empty() {
        println!("  (no holdings to report on)");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Symbol",
            "Shares",
            "Cost/Share",
            "Total Cost",
            "Current Price",
            "Current Value",
            "Unrealized G/L",
        ]);

    for row in rows {
        let (price, value, gl) = if row.price_is_unknown() {
            ("n/a".to_string(), "n/a".to_string(), "n/a".to_string())
        } else {
            (
                format!("${:.2}", row.current_price),
                format!("${:.2}", row.total_current_value),
                format!("${:+.2}", row.unrealized_gain_loss),
            )
        };

        table.add_row(vec![
            row.symbol.clone(),
            row.shares.to_string(),
            format!("${:.2}", row.cost_per_share),
            format!("${:.2}", row.total_cost),
            price,
            value,
            gl,
        ]);
    }
    println!("{table}");

    let unknown = rows.iter().filter(|r| r.price_is_unknown()).count();
    if unknown > 0 {
        println!(
            "{}",
            format!("{unknown} symbol(s) had no price available; see the log for details.")
                .yellow()
        );
    }
}
