use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::report::GainLossRow;
use crate::models::stock::Stock;
use crate::models::transaction::{Transaction, TransactionKind};

/// CSV wire formats for the three flat files.
///
/// The record structs pin the exact header names and column order; the
/// in-memory models stay free to evolve independently of the files.

// ── portfolio.csv ───────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(rename = "Symbol")]
    pub symbol: String,

    #[serde(rename = "Shares")]
    pub shares: u32,

    #[serde(rename = "CostPerShare")]
    pub cost_per_share: f64,
}

impl From<&Stock> for StockRecord {
    fn from(s: &Stock) -> Self {
        Self {
            symbol: s.symbol.clone(),
            shares: s.shares,
            cost_per_share: s.cost_per_share,
        }
    }
}

impl From<StockRecord> for Stock {
    fn from(r: StockRecord) -> Self {
        Stock::new(r.symbol, r.shares, r.cost_per_share)
    }
}

// ── transactions.csv ────────────────────────────────────────────────

/// Header row for the transaction file. Written explicitly on file
/// creation so the header exists even before the first row does.
pub const TRANSACTION_HEADER: [&str; 5] =
    ["Symbol", "TransactionType", "Shares", "CostPerShare", "Timestamp"];

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Symbol")]
    pub symbol: String,

    #[serde(rename = "TransactionType")]
    pub kind: TransactionKind,

    #[serde(rename = "Shares")]
    pub shares: u32,

    #[serde(rename = "CostPerShare")]
    pub cost_per_share: f64,

    #[serde(rename = "Timestamp", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

impl From<&Transaction> for TransactionRecord {
    fn from(t: &Transaction) -> Self {
        Self {
            symbol: t.symbol.clone(),
            kind: t.kind,
            shares: t.shares,
            cost_per_share: t.cost_per_share,
            timestamp: t.timestamp,
        }
    }
}

impl From<TransactionRecord> for Transaction {
    fn from(r: TransactionRecord) -> Self {
        Transaction {
            symbol: r.symbol,
            kind: r.kind,
            shares: r.shares,
            cost_per_share: r.cost_per_share,
            timestamp: r.timestamp,
        }
    }
}

// ── gain_loss_report.csv ────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct GainLossRecord {
    #[serde(rename = "Symbol")]
    pub symbol: String,

    #[serde(rename = "Shares")]
    pub shares: u32,

    #[serde(rename = "CostPerShare")]
    pub cost_per_share: f64,

    #[serde(rename = "TotalCost")]
    pub total_cost: f64,

    #[serde(rename = "CurrentPrice")]
    pub current_price: f64,

    #[serde(rename = "TotalPrice")]
    pub total_current_value: f64,

    #[serde(rename = "UnrealizedGL")]
    pub unrealized_gain_loss: f64,
}

impl From<&GainLossRow> for GainLossRecord {
    fn from(r: &GainLossRow) -> Self {
        Self {
            symbol: r.symbol.clone(),
            shares: r.shares,
            cost_per_share: r.cost_per_share,
            total_cost: r.total_cost,
            current_price: r.current_price,
            total_current_value: r.total_current_value,
            unrealized_gain_loss: r.unrealized_gain_loss,
        }
    }
}

// ── Timestamp column format ─────────────────────────────────────────

/// Timestamps are written as `YYYY-MM-DD HH:MM:SS.ffffff` (local time,
/// microsecond precision); parsing tolerates a missing fraction.
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
    const READ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(WRITE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, READ_FORMAT).map_err(serde::de::Error::custom)
    }
}
