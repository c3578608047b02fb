pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::path::Path;

use errors::CoreError;
use models::portfolio::Portfolio;
use models::report::GainLossRow;
use models::stock::Stock;
use models::transaction::{Transaction, TransactionKind};
use providers::registry::QuoteProviderRegistry;
use services::portfolio_service::PortfolioService;
use services::price_service::PriceService;
use services::report_service::ReportService;
use storage::manager::StorageManager;

/// Main entry point for the portfolio-tracker core library.
/// Holds the portfolio state and all services needed to operate on it.
#[must_use]
pub struct PortfolioTracker {
    portfolio: Portfolio,
    portfolio_service: PortfolioService,
    price_service: PriceService,
    report_service: ReportService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
    /// How many transactions (from the front of the log) have already been
    /// appended to the transaction file. Keeps repeated saves from writing
    /// the same rows twice.
    persisted_transactions: usize,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("stocks", &self.portfolio.stocks.len())
            .field("transactions", &self.portfolio.transactions.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl PortfolioTracker {
    /// Create a brand new empty portfolio with the default quote
    /// providers (Yahoo Finance, Stooq fallback).
    pub fn new() -> Self {
        Self::with_registry(QuoteProviderRegistry::new_with_defaults())
    }

    /// Create an empty portfolio with a caller-supplied provider registry.
    pub fn with_registry(registry: QuoteProviderRegistry) -> Self {
        Self {
            portfolio: Portfolio::new(),
            portfolio_service: PortfolioService::new(),
            price_service: PriceService::new(registry),
            report_service: ReportService::new(),
            dirty: false,
            persisted_transactions: 0,
        }
    }

    // ── Bookkeeping ─────────────────────────────────────────────────

    /// Append a holding. No uniqueness check: duplicate symbols are
    /// permitted, and lookups resolve to the first match.
    pub fn add_stock(&mut self, stock: Stock) {
        self.portfolio_service.add_stock(&mut self.portfolio, stock);
        self.dirty = true;
    }

    /// Process a buy or sell against the first holding matching `symbol`.
    /// A rejected transaction mutates nothing and logs nothing.
    pub fn transact(
        &mut self,
        symbol: &str,
        kind: TransactionKind,
        shares: u32,
        cost_per_share: f64,
    ) -> Result<(), CoreError> {
        self.portfolio_service
            .transact(&mut self.portfolio, symbol, kind, shares, cost_per_share)?;
        self.dirty = true;
        Ok(())
    }

    /// Total cost basis of the portfolio: Σ shares × cost_per_share.
    #[must_use]
    pub fn portfolio_value(&self) -> f64 {
        self.portfolio_service
            .calculate_portfolio_value(&self.portfolio)
    }

    #[must_use]
    pub fn stocks(&self) -> &[Stock] {
        &self.portfolio.stocks
    }

    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.portfolio.transactions
    }

    /// First holding matching `symbol`, if any.
    #[must_use]
    pub fn holding(&self, symbol: &str) -> Option<&Stock> {
        self.portfolio.find_stock(symbol)
    }

    /// Discard all holdings and transactions, starting over with an
    /// empty portfolio.
    pub fn reset(&mut self) {
        self.portfolio = Portfolio::new();
        self.dirty = false;
        self.persisted_transactions = 0;
    }

    // ── Reporting ───────────────────────────────────────────────────

    /// Build the unrealized gain/loss report. One row per holding; a
    /// failed price lookup yields the sentinel row, never an error.
    pub async fn gain_loss_report(&self) -> Vec<GainLossRow> {
        self.report_service
            .build_gain_loss(&self.portfolio, &self.price_service)
            .await
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Load holdings from the stock file, replacing the current list.
    /// Returns the number of holdings loaded.
    pub fn load_stocks_from(&mut self, path: &Path) -> Result<usize, CoreError> {
        let stocks = StorageManager::load_stocks(path)?;
        let count = stocks.len();
        self.portfolio.stocks = stocks;
        self.dirty = self.has_unsaved_transactions();
        Ok(count)
    }

    /// Write all holdings to the stock file (truncate-and-rewrite).
    pub fn save_stocks_to(&self, path: &Path) -> Result<(), CoreError> {
        StorageManager::save_stocks(&self.portfolio.stocks, path)
    }

    /// Append transactions not yet persisted to the transaction file.
    /// Returns the number of rows appended.
    pub fn append_new_transactions_to(&mut self, path: &Path) -> Result<usize, CoreError> {
        let pending = &self.portfolio.transactions[self.persisted_transactions..];
        let count = pending.len();
        StorageManager::append_transactions(pending, path)?;
        self.persisted_transactions = self.portfolio.transactions.len();
        Ok(count)
    }

    /// Save everything in sequence: the stock file, any unpersisted
    /// transactions, and the freshly built gain/loss report. There is no
    /// atomicity across the three files — a failure partway leaves the
    /// earlier files written. Returns the report rows for display.
    pub async fn save_all(
        &mut self,
        stock_path: &Path,
        transaction_path: &Path,
        report_path: &Path,
    ) -> Result<Vec<GainLossRow>, CoreError> {
        self.save_stocks_to(stock_path)?;
        self.append_new_transactions_to(transaction_path)?;

        let rows = self.gain_loss_report().await;
        StorageManager::save_gain_loss_report(&rows, report_path)?;

        self.dirty = false;
        Ok(rows)
    }

    // ── State flags ─────────────────────────────────────────────────

    /// Whether any mutation has occurred since the last save/load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    fn has_unsaved_transactions(&self) -> bool {
        self.persisted_transactions < self.portfolio.transactions.len()
    }
}

impl Default for PortfolioTracker {
    fn default() -> Self {
        Self::new()
    }
}
