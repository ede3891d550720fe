use crate::models::holding::PricingSource;
use crate::models::settings::Settings;

use super::coincap::CoinCapProvider;
use super::traits::QuoteProvider;
#[cfg(not(target_arch = "wasm32"))]
use super::yahoo_finance::YahooFinanceProvider;

/// Registry of available quote providers, routed by `PricingSource`.
///
/// At most one provider answers a source: the first registered one. There
/// is no fallback chain, so a batch gets exactly one attempt.
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

    /// Create a registry with the default providers configured from `settings`.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();

        // CoinCap: crypto, key optional
        registry.register(Box::new(CoinCapProvider::from_settings(settings)));

        // Yahoo Finance: equities and funds, no key.
        // Not available on WASM (uses native reqwest/tokio connectors)
        #[cfg(not(target_arch = "wasm32"))]
        {
            match YahooFinanceProvider::new(settings.quote_timeout()) {
                Ok(yahoo) => registry.register(Box::new(yahoo)),
                Err(e) => tracing::warn!("Yahoo Finance provider disabled: {e}"),
            }
        }

        registry
    }

    /// Register a new quote provider.
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        tracing::debug!(
            "Registering quote provider {} for {}",
            provider.name(),
            provider.source()
        );
        self.providers.push(provider);
    }

    /// The provider serving `source`, if any. `Manual` never has one.
    pub fn get_provider_for(&self, source: PricingSource) -> Option<&dyn QuoteProvider> {
        if !source.is_external() {
            return None;
        }
        self.providers
            .iter()
            .find(|p| p.source() == source)
            .map(|p| p.as_ref())
    }

    /// Names of all registered providers, in registration order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for QuoteProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
