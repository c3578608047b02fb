use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;
use crate::models::stock::Stock;
use crate::models::transaction::{Transaction, TransactionKind};

/// Manages holdings and the transaction log.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Append a holding to the portfolio.
    ///
    /// No uniqueness check: duplicate symbols are permitted, and lookups
    /// resolve to the first match.
    pub fn add_stock(&self, portfolio: &mut Portfolio, stock: Stock) {
        portfolio.stocks.push(stock);
    }

    /// Process a buy or sell against the first holding matching `symbol`.
    ///
    /// Validation happens before anything is logged or mutated: a rejected
    /// transaction leaves both the holding and the transaction log
    /// untouched. On success the transaction (timestamped now) is appended
    /// to the log and the holding is updated:
    /// - buy: cost basis becomes the quantity-weighted average of the old
    ///   basis and the new purchase, then shares increase
    /// - sell: shares decrease (the guard makes underflow impossible)
    pub fn transact(
        &self,
        portfolio: &mut Portfolio,
        symbol: &str,
        kind: TransactionKind,
        shares: u32,
        cost_per_share: f64,
    ) -> Result<(), CoreError> {
        let idx = portfolio
            .find_stock_index(symbol)
            .ok_or_else(|| CoreError::UnknownSymbol(symbol.to_string()))?;

        self.validate(&portfolio.stocks[idx], kind, shares, cost_per_share)?;

        portfolio
            .transactions
            .push(Transaction::new(symbol, kind, shares, cost_per_share));

        let stock = &mut portfolio.stocks[idx];
        match kind {
            TransactionKind::Buy => {
                let total_cost = stock.total_cost() + cost_per_share * f64::from(shares);
                let total_shares = stock.shares + shares;
                stock.cost_per_share = total_cost / f64::from(total_shares);
                stock.shares = total_shares;
            }
            TransactionKind::Sell => {
                stock.shares -= shares;
            }
        }

        Ok(())
    }

    /// Total cost basis of the portfolio: Σ shares × cost_per_share.
    /// Zero-share holdings contribute 0. O(n) scan, no caching.
    pub fn calculate_portfolio_value(&self, portfolio: &Portfolio) -> f64 {
        portfolio.stocks.iter().map(Stock::total_cost).sum()
    }

    /// Validate a transaction before it is logged or applied.
    ///
    /// Rules:
    /// - Share count must be positive
    /// - Cost per share must be finite and non-negative
    /// - A sell must not exceed the shares currently held
    fn validate(
        &self,
        stock: &Stock,
        kind: TransactionKind,
        shares: u32,
        cost_per_share: f64,
    ) -> Result<(), CoreError> {
        if shares == 0 {
            return Err(CoreError::ValidationError(
                "Share count must be positive".into(),
            ));
        }

        if !cost_per_share.is_finite() || cost_per_share < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Cost per share must be a non-negative number, got {cost_per_share}"
            )));
        }

        if kind == TransactionKind::Sell && stock.shares < shares {
            return Err(CoreError::InsufficientShares {
                symbol: stock.symbol.clone(),
                held: stock.shares,
                requested: shares,
            });
        }

        Ok(())
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
