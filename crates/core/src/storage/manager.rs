use std::fs::OpenOptions;
use std::path::Path;

use crate::errors::CoreError;
use crate::models::report::GainLossRow;
use crate::models::stock::Stock;
use crate::models::transaction::Transaction;

use super::records::{GainLossRecord, StockRecord, TransactionRecord, TRANSACTION_HEADER};

/// High-level file operations over the three comma-delimited flat files.
///
/// - stock file: truncate-and-rewrite on save, full parse on load
/// - transaction file: append-only; the header is written once, when the
///   file is first created
/// - report file: truncate-and-rewrite
///
/// Malformed rows propagate a parse failure to the caller; there is no
/// per-row recovery.
pub struct StorageManager;

impl StorageManager {
    /// Write all holdings to the stock file, replacing previous contents.
    pub fn save_stocks(stocks: &[Stock], path: &Path) -> Result<(), CoreError> {
        let mut writer = csv::Writer::from_path(path)?;
        for stock in stocks {
            writer.serialize(StockRecord::from(stock))?;
        }
        writer.flush()?;

        tracing::info!(file = %path.display(), count = stocks.len(), "portfolio file written to drive");
        Ok(())
    }

    /// Read every holding from the stock file.
    pub fn load_stocks(path: &Path) -> Result<Vec<Stock>, CoreError> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut stocks = Vec::new();
        for record in reader.deserialize() {
            let record: StockRecord = record?;
            stocks.push(record.into());
        }

        tracing::info!(file = %path.display(), count = stocks.len(), "portfolio file read into memory");
        Ok(stocks)
    }

    /// Append transactions to the transaction file.
    ///
    /// If the file does not exist yet it is created with a header row;
    /// otherwise rows are appended as-is, leaving prior rows and the
    /// original header untouched.
    pub fn append_transactions(
        transactions: &[Transaction],
        path: &Path,
    ) -> Result<(), CoreError> {
        let exists = path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if !exists {
            writer.write_record(TRANSACTION_HEADER)?;
        }
        for transaction in transactions {
            writer.serialize(TransactionRecord::from(transaction))?;
        }
        writer.flush()?;

        let mode = if exists { "append" } else { "create" };
        tracing::info!(file = %path.display(), mode, count = transactions.len(), "transactions file written");
        Ok(())
    }

    /// Read every transaction from the transaction file.
    pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>, CoreError> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut transactions = Vec::new();
        for record in reader.deserialize() {
            let record: TransactionRecord = record?;
            transactions.push(record.into());
        }

        tracing::info!(file = %path.display(), count = transactions.len(), "transactions file read into memory");
        Ok(transactions)
    }

    /// Write the gain/loss report, replacing previous contents.
    pub fn save_gain_loss_report(rows: &[GainLossRow], path: &Path) -> Result<(), CoreError> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in rows {
            writer.serialize(GainLossRecord::from(row))?;
        }
        writer.flush()?;

        tracing::info!(file = %path.display(), count = rows.len(), "gain/loss report written to drive");
        Ok(())
    }
}
