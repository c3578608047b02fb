use serde::{Deserialize, Serialize};

/// A single stock holding: ticker symbol, share count, and the
/// weighted-average cost paid per share.
///
/// `shares` is unsigned, so a negative holding is unrepresentable.
/// Mutation happens only through `PortfolioService::transact`, which
/// guards sells before touching the fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// Ticker symbol (e.g., "AAPL", "MSFT")
    pub symbol: String,

    /// Number of shares currently held. May be zero (a holding is never
    /// removed from the portfolio once created).
    pub shares: u32,

    /// Weighted-average cost per share, recomputed on each buy
    pub cost_per_share: f64,
}

impl Stock {
    pub fn new(symbol: impl Into<String>, shares: u32, cost_per_share: f64) -> Self {
        Self {
            symbol: symbol.into(),
            shares,
            cost_per_share,
        }
    }

    /// A brand-new holding with no shares yet. Created when the user
    /// transacts on a symbol the portfolio has never seen.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self::new(symbol, 0, 0.0)
    }

    /// Total cost basis of this holding: shares × cost per share.
    pub fn total_cost(&self) -> f64 {
        f64::from(self.shares) * self.cost_per_share
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Symbol: {} Shares: {} Cost per share: ${:.2}",
            self.symbol, self.shares, self.cost_per_share
        )
    }
}
