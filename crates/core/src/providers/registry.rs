use super::stooq::StooqProvider;
use super::traits::QuoteProvider;
use super::yahoo_finance::YahooFinanceProvider;

/// Registry of available quote providers, in fallback order.
///
/// `PriceService` walks the registered providers front to back and takes
/// the first successful answer. New providers can be added without
/// modifying existing code.
pub struct QuoteProviderRegistry {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl QuoteProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with the default providers pre-configured:
    /// Yahoo Finance first, Stooq as fallback. Neither needs an API key.
    pub fn new_with_defaults() -> Self {
        let mut registry = Self::new();

        if let Ok(yahoo) = YahooFinanceProvider::new() {
            registry.register(Box::new(yahoo));
        }

        registry.register(Box::new(StooqProvider::new()));

        registry
    }

    /// Register a provider at the end of the fallback chain.
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.providers.push(provider);
    }

    /// All registered providers, in fallback order.
    pub fn providers(&self) -> &[Box<dyn QuoteProvider>] {
        &self.providers
    }
}

impl Default for QuoteProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
