use async_trait::async_trait;

use crate::errors::CoreError;

/// Trait abstraction for market-data sources.
///
/// Each quote source (Yahoo Finance, Stooq) implements this trait. If an
/// API stops working or changes, only that one implementation is
/// replaced — the rest of the codebase is untouched.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Most recent daily closing price of `symbol`, in the stock's
    /// native currency.
    async fn latest_close(&self, symbol: &str) -> Result<f64, CoreError>;
}
