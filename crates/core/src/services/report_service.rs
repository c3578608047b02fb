use crate::models::portfolio::Portfolio;
use crate::models::report::{GainLossRow, PRICE_UNAVAILABLE};
use crate::services::price_service::PriceService;

/// Builds the unrealized gain/loss report.
///
/// One row per holding, in portfolio order. Price lookups are sequential
/// and a failed lookup never blocks the remaining symbols: the failing
/// row is emitted with the `PRICE_UNAVAILABLE` sentinel and the failure
/// is logged.
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    pub async fn build_gain_loss(
        &self,
        portfolio: &Portfolio,
        price_service: &PriceService,
    ) -> Vec<GainLossRow> {
        let mut rows = Vec::with_capacity(portfolio.stocks.len());

        for stock in &portfolio.stocks {
            let current_price = match price_service.latest_close(&stock.symbol).await {
                Ok(price) => {
                    tracing::info!(symbol = %stock.symbol, price, "fetched latest price");
                    price
                }
                Err(e) => {
                    tracing::error!(
                        symbol = %stock.symbol,
                        error = %e,
                        "unable to retrieve the latest price"
                    );
                    PRICE_UNAVAILABLE
                }
            };

            rows.push(GainLossRow::from_stock(stock, current_price));
        }

        rows
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
