use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::holding::PricingSource;
use super::batch::collect_within;
use super::traits::{QuoteBatch, QuoteProvider};

const PROVIDER: &str = "Yahoo Finance";

/// Yahoo Finance provider for equities, ETFs and mutual funds.
///
/// - **Free**: No API key required (unofficial public API).
/// - **Keys**: Yahoo tickers ("AAPL", "VWCE.DE", "PETR4.SA").
/// - **Currency**: quotes are in each instrument's listing currency.
///
/// `yahoo_finance_api` has no multi-symbol quote call, so one batch is
/// served by concurrent latest-quote lookups, one per ticker, sharing a
/// single deadline. Tickers that fail or are still pending at the deadline
/// are left out of the result instead of failing the batch.
///
/// **Note**: Not WASM-compatible (uses native reqwest/tokio).
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
    batch_timeout: Duration,
}

impl YahooFinanceProvider {
    pub fn new(timeout: Duration) -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to create connector: {e}"),
            })?;
        Ok(Self {
            connector,
            batch_timeout: timeout,
        })
    }

    async fn latest_close(&self, ticker: &str) -> Result<Decimal, CoreError> {
        let resp = self
            .connector
            .get_latest_quotes(ticker, "1d")
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to fetch latest quote for {ticker}: {e}"),
            })?;

        let quote = resp.last_quote().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("No quote data for {ticker}: {e}"),
        })?;

        Decimal::try_from(quote.close).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Invalid close price for {ticker} ({}): {e}", quote.close),
        })
    }
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn source(&self) -> PricingSource {
        PricingSource::ExternalEquity
    }

    async fn get_prices(&self, keys: &[String]) -> Result<QuoteBatch, CoreError> {
        let lookups = keys
            .iter()
            .map(|ticker| async move { (ticker, self.latest_close(ticker).await) });
        let outcome = collect_within(self.batch_timeout, lookups).await;

        if outcome.unfinished > 0 {
            tracing::warn!(
                "{} of {} Yahoo lookups still pending after {:?}; leaving them out",
                outcome.unfinished,
                keys.len(),
                self.batch_timeout
            );
        }

        let mut prices = QuoteBatch::with_capacity(outcome.finished.len());
        for (ticker, result) in outcome.finished {
            match result {
                Ok(price) => {
                    prices.insert(ticker.clone(), price);
                }
                Err(e) => tracing::warn!("{e}"),
            }
        }
        Ok(prices)
    }
}
