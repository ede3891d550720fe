use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::CoreError;

pub const DEFAULT_COINCAP_BASE_URL: &str = "https://api.coincap.io/v2";

/// Upper bound for the quote timeout, in seconds.
pub const MAX_QUOTE_TIMEOUT_SECS: u64 = 120;

/// Application settings: quote currency, provider endpoints and API keys.
///
/// Loaded once by the host application and passed to
/// `QuoteProviderRegistry::new_with_defaults`. Unknown fields are ignored
/// and missing fields take their defaults, so older settings files keep
/// loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Label of the currency all quotes are expressed in (e.g. "USD").
    /// Providers are expected to quote in this currency; no conversion is done.
    pub currency: String,

    /// Timeout for a single batched quote request.
    pub quote_timeout_secs: u64,

    /// Base URL of the CoinCap API.
    pub coincap_base_url: String,

    /// Optional API keys, by provider name (e.g. "coincap").
    pub api_keys: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            quote_timeout_secs: 10,
            coincap_base_url: DEFAULT_COINCAP_BASE_URL.to_string(),
            api_keys: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file. A missing file yields the defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.currency.trim().is_empty() {
            return Err(CoreError::Config("currency must not be empty".into()));
        }
        if !(1..=MAX_QUOTE_TIMEOUT_SECS).contains(&self.quote_timeout_secs) {
            return Err(CoreError::Config(format!(
                "quote_timeout_secs out of range: {} (expected 1..={MAX_QUOTE_TIMEOUT_SECS})",
                self.quote_timeout_secs
            )));
        }
        if !(self.coincap_base_url.starts_with("http://")
            || self.coincap_base_url.starts_with("https://"))
        {
            return Err(CoreError::Config(format!(
                "coincap_base_url must be an http(s) URL, got {:?}",
                self.coincap_base_url
            )));
        }
        Ok(())
    }

    pub fn quote_timeout(&self) -> Duration {
        Duration::from_secs(self.quote_timeout_secs)
    }

    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys
            .get(provider)
            .map(String::as_str)
            .filter(|k| !k.is_empty())
    }
}
