use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Kind of portfolio transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Acquiring shares
    Buy,
    /// Disposing of shares
    Sell,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Buy => write!(f, "buy"),
            TransactionKind::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TransactionKind::Buy),
            "sell" => Ok(TransactionKind::Sell),
            other => Err(CoreError::ValidationError(format!(
                "Invalid transaction type '{other}'. Use 'buy' or 'sell'."
            ))),
        }
    }
}

/// An immutable record of one buy/sell against a holding, timestamped
/// with local time at creation. Owned by the portfolio's append-only log.
///
/// The record stores the symbol by value rather than a reference to the
/// holding: the transaction file keeps only the symbol, and nothing ever
/// dereferences a past transaction back to the live `Stock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Symbol of the stock transacted
    pub symbol: String,

    /// Buy or sell
    pub kind: TransactionKind,

    /// Number of shares transacted (always positive)
    pub shares: u32,

    /// Price paid/received per share
    pub cost_per_share: f64,

    /// Local date-time at which the transaction was entered
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    pub fn new(
        symbol: impl Into<String>,
        kind: TransactionKind,
        shares: u32,
        cost_per_share: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
            shares,
            cost_per_share,
            timestamp: chrono::Local::now().naive_local(),
        }
    }

    /// Total money moved by this transaction: shares × cost per share.
    pub fn total_cost(&self) -> f64 {
        f64::from(self.shares) * self.cost_per_share
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} shares of {} at ${:.2} per share on {}",
            self.kind, self.shares, self.symbol, self.cost_per_share, self.timestamp
        )
    }
}
