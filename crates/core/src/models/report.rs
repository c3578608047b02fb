use serde::{Deserialize, Serialize};

use super::stock::Stock;

/// Sentinel meaning "price unavailable". The report file's CurrentPrice
/// column and the UnrealizedGL arithmetic are defined in terms of this
/// value. Callers must treat it as "unknown", never as a real price.
pub const PRICE_UNAVAILABLE: f64 = -1.0;

/// One row of the unrealized gain/loss report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainLossRow {
    /// Ticker symbol
    pub symbol: String,

    /// Shares held
    pub shares: u32,

    /// Weighted-average cost per share
    pub cost_per_share: f64,

    /// shares × cost_per_share
    pub total_cost: f64,

    /// Latest close from a quote provider, or `PRICE_UNAVAILABLE`
    pub current_price: f64,

    /// current_price × shares (computed with the sentinel when unknown)
    pub total_current_value: f64,

    /// total_current_value − total_cost
    pub unrealized_gain_loss: f64,
}

impl GainLossRow {
    /// Derive a row from a holding and a fetched price (or the sentinel).
    pub fn from_stock(stock: &Stock, current_price: f64) -> Self {
        let total_cost = stock.total_cost();
        let total_current_value = current_price * f64::from(stock.shares);
        Self {
            symbol: stock.symbol.clone(),
            shares: stock.shares,
            cost_per_share: stock.cost_per_share,
            total_cost,
            current_price,
            total_current_value,
            unrealized_gain_loss: total_current_value - total_cost,
        }
    }

    /// Whether the price lookup failed for this row.
    pub fn price_is_unknown(&self) -> bool {
        self.current_price == PRICE_UNAVAILABLE
    }
}
