use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::holding::PricingSource;
use crate::models::settings::{Settings, DEFAULT_COINCAP_BASE_URL};
use super::traits::{QuoteBatch, QuoteProvider};

const PROVIDER: &str = "CoinCap";

/// CoinCap API provider for cryptocurrency prices.
///
/// - **Batching**: `/assets?ids=bitcoin,ethereum` prices any number of
///   assets in one request.
/// - **Keys**: CoinCap asset ids, lowercase ("bitcoin", "usd-coin").
/// - **Currency**: quotes are in USD (`priceUsd`).
pub struct CoinCapProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinCapProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_COINCAP_BASE_URL)
    }

    /// Point the provider at a different host (mirrors, tests).
    pub fn with_base_url(base_url: &str) -> Self {
        Self::build(base_url, None, 10)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::build(
            &settings.coincap_base_url,
            settings.api_key("coincap").map(str::to_string),
            settings.quote_timeout_secs,
        )
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    fn build(base_url: &str, api_key: Option<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn api_error(message: String) -> CoreError {
        CoreError::Api {
            provider: PROVIDER.into(),
            message,
        }
    }
}

impl Default for CoinCapProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinCap API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct AssetsResponse {
    data: Vec<AssetData>,
}

#[derive(Deserialize)]
struct AssetData {
    id: String,
    #[serde(rename = "priceUsd")]
    price_usd: Option<String>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteProvider for CoinCapProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn source(&self) -> PricingSource {
        PricingSource::ExternalCrypto
    }

    async fn get_prices(&self, keys: &[String]) -> Result<QuoteBatch, CoreError> {
        if keys.is_empty() {
            return Ok(QuoteBatch::new());
        }

        let ids = keys.join(",");
        let url = format!("{}/assets", self.base_url);
        tracing::debug!("CoinCap batch request for {} ids", keys.len());

        let mut request = self.client.get(&url).query(&[("ids", ids.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(format!("HTTP {status} for ids={ids}")));
        }

        let body: AssetsResponse = response
            .json()
            .await
            .map_err(|e| Self::api_error(format!("Failed to parse assets response: {e}")))?;

        let mut prices = QuoteBatch::with_capacity(body.data.len());
        for asset in body.data {
            let Some(raw) = asset.price_usd else {
                tracing::debug!("CoinCap returned no price for {}", asset.id);
                continue;
            };
            match Decimal::from_str(raw.trim()) {
                Ok(price) => {
                    prices.insert(asset.id, price);
                }
                Err(e) => {
                    tracing::warn!("CoinCap price for {} is not a number ({raw:?}): {e}", asset.id);
                }
            }
        }

        Ok(prices)
    }
}
