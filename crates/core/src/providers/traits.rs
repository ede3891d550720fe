use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::holding::PricingSource;

/// Prices returned by a single batched quote request, keyed by pricing key.
/// Keys the provider could not price are simply absent.
pub type QuoteBatch = HashMap<String, Decimal>;

/// Trait abstraction for external quote services.
///
/// One implementation per service (CoinCap for crypto, Yahoo Finance for
/// equities and funds). The resolver only ever talks to this trait, so a
/// provider can be swapped without touching valuation code.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// The pricing source this provider serves.
    fn source(&self) -> PricingSource;

    /// Fetch current unit prices for all `keys` in one request.
    ///
    /// An `Err` means the whole batch failed (network, timeout, bad payload).
    /// A key missing from the returned map means only that key is unknown.
    async fn get_prices(&self, keys: &[String]) -> Result<QuoteBatch, CoreError>;
}
