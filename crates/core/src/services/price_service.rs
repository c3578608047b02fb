use crate::errors::CoreError;
use crate::providers::registry::QuoteProviderRegistry;

/// Fetches current stock prices from quote providers.
///
/// Providers are tried in registration order; if the primary fails (API
/// down, symbol unknown, network error) the next one is tried. Returned
/// prices must be finite and non-negative or the provider's answer is
/// discarded and the fallback continues.
///
/// No caching: every lookup is a live call, one per symbol.
pub struct PriceService {
    registry: QuoteProviderRegistry,
}

impl PriceService {
    pub fn new(registry: QuoteProviderRegistry) -> Self {
        Self { registry }
    }

    /// Names of the registered providers, in fallback order.
    pub fn provider_names(&self) -> Vec<String> {
        self.registry
            .providers()
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Most recent daily closing price for `symbol`.
    ///
    /// Errors only when every registered provider has failed; the last
    /// provider error is returned.
    pub async fn latest_close(&self, symbol: &str) -> Result<f64, CoreError> {
        let providers = self.registry.providers();
        if providers.is_empty() {
            return Err(CoreError::QuoteUnavailable(symbol.to_string()));
        }

        let mut last_error = None;

        for provider in providers {
            match provider.latest_close(symbol).await {
                Ok(price) => {
                    if !price.is_finite() || price < 0.0 {
                        last_error = Some(CoreError::Api {
                            provider: provider.name().to_string(),
                            message: format!(
                                "Invalid price returned for {symbol}: {price} (must be finite and non-negative)"
                            ),
                        });
                        continue;
                    }
                    return Ok(price);
                }
                Err(e) => {
                    tracing::debug!(
                        provider = provider.name(),
                        symbol,
                        error = %e,
                        "quote provider failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::QuoteUnavailable(symbol.to_string())))
    }
}
