// ═══════════════════════════════════════════════════════════════════
// Storage Tests — flat-file round trips, append semantics, headers
// ═══════════════════════════════════════════════════════════════════

use std::fs;
use std::path::PathBuf;

use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::models::report::GainLossRow;
use portfolio_tracker_core::models::stock::Stock;
use portfolio_tracker_core::models::transaction::{Transaction, TransactionKind};
use portfolio_tracker_core::providers::registry::QuoteProviderRegistry;
use portfolio_tracker_core::storage::manager::StorageManager;
use portfolio_tracker_core::PortfolioTracker;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
}

fn temp_path(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ═══════════════════════════════════════════════════════════════════
// Stock file
// ═══════════════════════════════════════════════════════════════════

mod stock_file {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "portfolio.csv");
        let stocks = vec![
            Stock::new("AAPL", 10, 185.5),
            Stock::new("MSFT", 3, 410.25),
            Stock::new("ZERO", 0, 0.0),
        ];

        StorageManager::save_stocks(&stocks, &path).unwrap();
        let loaded = StorageManager::load_stocks(&path).unwrap();

        assert_eq!(loaded.len(), 3);
        for (a, b) in stocks.iter().zip(&loaded) {
            assert_eq!(a.symbol, b.symbol);
            assert_eq!(a.shares, b.shares);
            assert_close(a.cost_per_share, b.cost_per_share);
        }
    }

    #[test]
    fn file_starts_with_the_header_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "portfolio.csv");

        StorageManager::save_stocks(&[Stock::new("AAPL", 10, 185.5)], &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.lines().next().unwrap(),
            "Symbol,Shares,CostPerShare"
        );
    }

    #[test]
    fn save_truncates_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "portfolio.csv");

        StorageManager::save_stocks(
            &[Stock::new("A", 1, 1.0), Stock::new("B", 2, 2.0)],
            &path,
        )
        .unwrap();
        StorageManager::save_stocks(&[Stock::new("C", 3, 3.0)], &path).unwrap();

        let loaded = StorageManager::load_stocks(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].symbol, "C");
    }

    #[test]
    fn loading_a_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StorageManager::load_stocks(&temp_path(&dir, "nope.csv")).unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }

    #[test]
    fn malformed_share_count_propagates_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "portfolio.csv");
        fs::write(&path, "Symbol,Shares,CostPerShare\nAAPL,ten,185.5\n").unwrap();

        let err = StorageManager::load_stocks(&path).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRow(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Transaction file
// ═══════════════════════════════════════════════════════════════════

mod transaction_file {
    use super::*;

    fn tx(symbol: &str, kind: TransactionKind, shares: u32, cost: f64) -> Transaction {
        Transaction::new(symbol, kind, shares, cost)
    }

    #[test]
    fn first_write_creates_the_file_with_a_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "transactions.csv");

        StorageManager::append_transactions(
            &[tx("AAPL", TransactionKind::Buy, 10, 185.5)],
            &path,
        )
        .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.lines().next().unwrap(),
            "Symbol,TransactionType,Shares,CostPerShare,Timestamp"
        );
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn creating_with_no_pending_rows_still_writes_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "transactions.csv");

        StorageManager::append_transactions(&[], &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.trim_end(),
            "Symbol,TransactionType,Shares,CostPerShare,Timestamp"
        );
        assert!(StorageManager::load_transactions(&path).unwrap().is_empty());
    }

    #[test]
    fn appending_preserves_prior_rows_and_never_repeats_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "transactions.csv");

        StorageManager::append_transactions(
            &[tx("AAPL", TransactionKind::Buy, 10, 185.5)],
            &path,
        )
        .unwrap();
        StorageManager::append_transactions(
            &[
                tx("AAPL", TransactionKind::Sell, 4, 190.0),
                tx("MSFT", TransactionKind::Buy, 2, 410.0),
            ],
            &path,
        )
        .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let header_count = contents
            .lines()
            .filter(|l| l.starts_with("Symbol,"))
            .count();
        assert_eq!(header_count, 1);
        assert_eq!(contents.lines().count(), 4);
        assert!(contents.lines().nth(1).unwrap().starts_with("AAPL,buy,10,"));
    }

    #[test]
    fn write_then_read_round_trips_including_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "transactions.csv");
        let written = vec![
            tx("AAPL", TransactionKind::Buy, 10, 185.5),
            tx("XYZ", TransactionKind::Sell, 3, 9.99),
        ];

        StorageManager::append_transactions(&written, &path).unwrap();
        let loaded = StorageManager::load_transactions(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        for (a, b) in written.iter().zip(&loaded) {
            assert_eq!(a.symbol, b.symbol);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.shares, b.shares);
            assert_close(a.cost_per_share, b.cost_per_share);
            // timestamps are written with microsecond precision
            assert_eq!(
                a.timestamp.and_utc().timestamp_micros(),
                b.timestamp.and_utc().timestamp_micros()
            );
        }
    }

    #[test]
    fn timestamps_without_a_fraction_still_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "transactions.csv");
        fs::write(
            &path,
            "Symbol,TransactionType,Shares,CostPerShare,Timestamp\n\
             AAPL,buy,10,185.5,2026-08-07 09:30:00\n",
        )
        .unwrap();

        let loaded = StorageManager::load_transactions(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].timestamp.to_string(), "2026-08-07 09:30:00");
    }

    #[test]
    fn unknown_transaction_type_propagates_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "transactions.csv");
        fs::write(
            &path,
            "Symbol,TransactionType,Shares,CostPerShare,Timestamp\n\
             AAPL,hold,10,185.5,2026-08-07 09:30:00\n",
        )
        .unwrap();

        let err = StorageManager::load_transactions(&path).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRow(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Gain/loss report file
// ═══════════════════════════════════════════════════════════════════

mod report_file {
    use super::*;

    #[test]
    fn writes_the_report_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "gain_loss_report.csv");
        let rows = vec![
            GainLossRow::from_stock(&Stock::new("ABC", 20, 6.0), 7.5),
            GainLossRow::from_stock(&Stock::new("BAD", 10, 2.0), -1.0),
        ];

        StorageManager::save_gain_loss_report(&rows, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Symbol,Shares,CostPerShare,TotalCost,CurrentPrice,TotalPrice,UnrealizedGL"
        );
        assert_eq!(lines.next().unwrap(), "ABC,20,6.0,120.0,7.5,150.0,30.0");
        // The sentinel is written raw: -1 * 10 - 20 = -30
        assert_eq!(lines.next().unwrap(), "BAD,10,2.0,20.0,-1.0,-10.0,-30.0");
    }
}

// ═══════════════════════════════════════════════════════════════════
// PortfolioTracker persistence
// ═══════════════════════════════════════════════════════════════════

mod tracker_persistence {
    use super::*;

    fn tracker() -> PortfolioTracker {
        // Empty registry: price lookups all fail, reports carry sentinels
        PortfolioTracker::with_registry(QuoteProviderRegistry::new())
    }

    #[test]
    fn load_replaces_the_current_stock_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "portfolio.csv");
        StorageManager::save_stocks(&[Stock::new("AAPL", 10, 185.5)], &path).unwrap();

        let mut t = tracker();
        t.add_stock(Stock::new("OLD", 1, 1.0));

        let count = t.load_stocks_from(&path).unwrap();
        assert_eq!(count, 1);
        assert_eq!(t.stocks().len(), 1);
        assert_eq!(t.stocks()[0].symbol, "AAPL");

        // Re-loading does not duplicate state either
        t.load_stocks_from(&path).unwrap();
        assert_eq!(t.stocks().len(), 1);
    }

    #[tokio::test]
    async fn save_all_writes_all_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let stock_path = temp_path(&dir, "portfolio.csv");
        let tx_path = temp_path(&dir, "transactions.csv");
        let report_path = temp_path(&dir, "gain_loss_report.csv");

        let mut t = tracker();
        t.add_stock(Stock::empty("AAPL"));
        t.transact("AAPL", TransactionKind::Buy, 10, 5.0).unwrap();

        let rows = t.save_all(&stock_path, &tx_path, &report_path).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows[0].price_is_unknown());
        assert!(stock_path.exists());
        assert!(tx_path.exists());
        assert!(report_path.exists());
        assert!(!t.has_unsaved_changes());
    }

    #[tokio::test]
    async fn repeated_saves_never_duplicate_transaction_rows() {
        let dir = tempfile::tempdir().unwrap();
        let stock_path = temp_path(&dir, "portfolio.csv");
        let tx_path = temp_path(&dir, "transactions.csv");
        let report_path = temp_path(&dir, "gain_loss_report.csv");

        let mut t = tracker();
        t.add_stock(Stock::empty("AAPL"));
        t.transact("AAPL", TransactionKind::Buy, 10, 5.0).unwrap();
        t.save_all(&stock_path, &tx_path, &report_path).await.unwrap();

        // Second save with one new transaction: exactly one row appended
        t.transact("AAPL", TransactionKind::Sell, 2, 6.0).unwrap();
        t.save_all(&stock_path, &tx_path, &report_path).await.unwrap();

        // And a save with nothing new appends nothing
        t.save_all(&stock_path, &tx_path, &report_path).await.unwrap();

        let loaded = StorageManager::load_transactions(&tx_path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].kind, TransactionKind::Buy);
        assert_eq!(loaded[1].kind, TransactionKind::Sell);
    }
}
