use serde::{Deserialize, Serialize};

use super::stock::Stock;
use super::transaction::Transaction;

/// The main data container: current holdings plus the session's
/// append-only transaction log.
///
/// A dumb aggregate — all bookkeeping logic lives in
/// `services::portfolio_service`. The stock list is ordered and keyed
/// implicitly by symbol; the container itself does not deduplicate
/// (lookups resolve to the first matching symbol).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    /// All holdings, in insertion/load order
    pub stocks: Vec<Stock>,

    /// Buy/sell transactions entered this session, oldest first
    pub transactions: Vec<Transaction>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// First holding matching `symbol`, if any.
    pub fn find_stock(&self, symbol: &str) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.symbol == symbol)
    }

    /// Index of the first holding matching `symbol`, if any.
    pub fn find_stock_index(&self, symbol: &str) -> Option<usize> {
        self.stocks.iter().position(|s| s.symbol == symbol)
    }
}
