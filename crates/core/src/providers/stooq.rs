use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::traits::QuoteProvider;
use crate::errors::CoreError;

const BASE_URL: &str = "https://stooq.com/q/l/";

/// Stooq quote provider (fallback).
///
/// - **Free**: No API key required.
/// - **Format**: One-line CSV per symbol over plain HTTPS.
/// - **Coverage**: US and European equities, indices, forex.
///
/// US tickers are addressed with a `.us` suffix (e.g. `aapl.us`);
/// symbols that already carry an exchange suffix are passed through.
/// Unknown symbols come back with `N/D` in the close column.
pub struct StooqProvider {
    client: Client,
}

impl StooqProvider {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn stooq_symbol(symbol: &str) -> String {
        let lower = symbol.to_lowercase();
        if lower.contains('.') {
            lower
        } else {
            format!("{lower}.us")
        }
    }
}

// ── Stooq CSV response row ──────────────────────────────────────────

#[derive(Deserialize)]
struct StooqRow {
    #[serde(rename = "Close")]
    close: String,
}

#[async_trait]
impl QuoteProvider for StooqProvider {
    fn name(&self) -> &str {
        "Stooq"
    }

    async fn latest_close(&self, symbol: &str) -> Result<f64, CoreError> {
        let body = self
            .client
            .get(BASE_URL)
            .query(&[
                ("s", Self::stooq_symbol(symbol).as_str()),
                ("f", "sd2t2ohlcv"),
                ("h", ""),
                ("e", "csv"),
            ])
            .send()
            .await?
            .text()
            .await?;

        let mut reader = csv::Reader::from_reader(body.as_bytes());
        let row: StooqRow = reader
            .deserialize()
            .next()
            .ok_or_else(|| CoreError::Api {
                provider: "Stooq".into(),
                message: format!("Empty response for {symbol}"),
            })?
            .map_err(|e| CoreError::Api {
                provider: "Stooq".into(),
                message: format!("Failed to parse quote for {symbol}: {e}"),
            })?;

        // "N/D" marks an unknown symbol or a symbol with no data
        row.close.parse().map_err(|_| CoreError::Api {
            provider: "Stooq".into(),
            message: format!("No quote data for {symbol} (close = {})", row.close),
        })
    }
}
