use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

use crate::errors::{CoreError, PriceError};
use crate::models::holding::PricingSource;
use crate::providers::registry::QuoteProviderRegistry;

/// Per-key outcome of a batched price lookup.
pub type ResolvedPrices = HashMap<String, Result<Decimal, PriceError>>;

/// Resolves unit prices for externally priced holdings.
///
/// - One provider request per call, for the distinct set of keys.
/// - A key that cannot be priced resolves to `PriceError::Unavailable`;
///   it is never turned into zero here. Valuation owns that policy.
/// - No retries and no fallback provider. Callers that want a retry call
///   again.
pub struct PriceResolver {
    registry: QuoteProviderRegistry,
}

impl PriceResolver {
    pub fn new(registry: QuoteProviderRegistry) -> Self {
        Self { registry }
    }

    /// Check if a provider is registered for `source`.
    pub fn has_provider_for(&self, source: PricingSource) -> bool {
        self.registry.get_provider_for(source).is_some()
    }

    pub fn registry(&self) -> &QuoteProviderRegistry {
        &self.registry
    }

    /// Resolve a single key. Prefer [`resolve_batch`](Self::resolve_batch)
    /// when pricing more than one holding.
    pub async fn resolve(&self, source: PricingSource, key: &str) -> Result<Decimal, PriceError> {
        let mut resolved = self.resolve_batch(source, &[key.to_string()]).await;
        resolved
            .remove(key)
            .unwrap_or_else(|| Err(PriceError::unavailable(key, "not requested")))
    }

    /// Resolve every distinct key in `keys` with a single provider request.
    ///
    /// The result holds exactly one entry per distinct key.
    pub async fn resolve_batch(&self, source: PricingSource, keys: &[String]) -> ResolvedPrices {
        let distinct: Vec<String> = keys
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if distinct.is_empty() {
            return ResolvedPrices::new();
        }

        let all_unavailable = |reason: &str| -> ResolvedPrices {
            distinct
                .iter()
                .map(|k| (k.clone(), Err(PriceError::unavailable(k, reason))))
                .collect()
        };

        if !source.is_external() {
            tracing::warn!("Price lookup requested for manually priced keys; nothing to query");
            return all_unavailable("manual pricing has no quote provider");
        }

        let Some(provider) = self.registry.get_provider_for(source) else {
            tracing::warn!("No quote provider registered for {source}");
            return all_unavailable(&CoreError::NoProvider(source.to_string()).to_string());
        };

        tracing::debug!(
            "Requesting {} quote(s) from {} for {source}",
            distinct.len(),
            provider.name()
        );

        let mut quotes = match provider.get_prices(&distinct).await {
            Ok(quotes) => quotes,
            Err(e) => {
                tracing::warn!("{} batch failed: {e}", provider.name());
                return all_unavailable(&e.to_string());
            }
        };

        distinct
            .into_iter()
            .map(|key| {
                let outcome = match quotes.remove(&key) {
                    Some(price) if price >= Decimal::ZERO => Ok(price),
                    Some(price) => Err(PriceError::unavailable(
                        &key,
                        format!("{} returned a negative price: {price}", provider.name()),
                    )),
                    None => Err(PriceError::unavailable(
                        &key,
                        format!("{} has no price for this key", provider.name()),
                    )),
                };
                (key, outcome)
            })
            .collect()
    }
}
