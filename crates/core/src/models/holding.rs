use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The category of a tracked asset. Purely descriptive: the price lookup is
/// driven by [`PricingSource`], not by the asset type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetType {
    Crypto,
    Equity,
    Fund,
    RealEstate,
    Vehicle,
    Collectible,
    Other,
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Crypto => write!(f, "Crypto"),
            AssetType::Equity => write!(f, "Equity"),
            AssetType::Fund => write!(f, "Fund"),
            AssetType::RealEstate => write!(f, "Real Estate"),
            AssetType::Vehicle => write!(f, "Vehicle"),
            AssetType::Collectible => write!(f, "Collectible"),
            AssetType::Other => write!(f, "Other"),
        }
    }
}

/// Where the unit price of a holding comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PricingSource {
    /// Crypto quote service (CoinCap), keyed by asset id like "bitcoin"
    ExternalCrypto,
    /// Equities/funds quote service (Yahoo Finance), keyed by ticker
    ExternalEquity,
    /// User-entered unit price, no lookup
    Manual,
}

impl PricingSource {
    pub fn is_external(&self) -> bool {
        !matches!(self, PricingSource::Manual)
    }
}

impl std::fmt::Display for PricingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingSource::ExternalCrypto => write!(f, "ExternalCrypto"),
            PricingSource::ExternalEquity => write!(f, "ExternalEquity"),
            PricingSource::Manual => write!(f, "Manual"),
        }
    }
}

/// Identity of a holding for insert-or-replace: `(asset_type, name, symbol)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HoldingKey {
    pub asset_type: AssetType,
    pub name: String,
    pub symbol: String,
}

/// A quantity of some asset held by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetHolding {
    pub asset_type: AssetType,

    /// Human-readable name (e.g. "Bitcoin", "Apartment")
    pub name: String,

    /// Ticker or short code, may be empty
    #[serde(default)]
    pub symbol: String,

    pub pricing_source: PricingSource,

    /// External lookup id; empty for manually priced holdings
    #[serde(default)]
    pub pricing_key: String,

    pub quantity: Decimal,

    /// Only meaningful when `pricing_source` is `Manual`
    #[serde(default)]
    pub manual_unit_price: Decimal,
}

impl AssetHolding {
    /// A holding priced by an external quote provider.
    pub fn external(
        asset_type: AssetType,
        name: impl Into<String>,
        symbol: impl Into<String>,
        pricing_source: PricingSource,
        pricing_key: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self {
            asset_type,
            name: name.into(),
            symbol: symbol.into(),
            pricing_source,
            pricing_key: pricing_key.into(),
            quantity,
            manual_unit_price: Decimal::ZERO,
        }
    }

    /// A holding with a user-entered unit price.
    pub fn manual(
        asset_type: AssetType,
        name: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            asset_type,
            name: name.into(),
            symbol: String::new(),
            pricing_source: PricingSource::Manual,
            pricing_key: String::new(),
            quantity,
            manual_unit_price: unit_price,
        }
    }

    pub fn crypto(name: impl Into<String>, symbol: impl Into<String>, coin_id: impl Into<String>, quantity: Decimal) -> Self {
        Self::external(
            AssetType::Crypto,
            name,
            symbol,
            PricingSource::ExternalCrypto,
            coin_id,
            quantity,
        )
    }

    pub fn equity(name: impl Into<String>, ticker: impl Into<String>, quantity: Decimal) -> Self {
        let ticker = ticker.into();
        Self::external(
            AssetType::Equity,
            name,
            ticker.clone(),
            PricingSource::ExternalEquity,
            ticker,
            quantity,
        )
    }

    pub fn key(&self) -> HoldingKey {
        HoldingKey {
            asset_type: self.asset_type,
            name: self.name.clone(),
            symbol: self.symbol.clone(),
        }
    }
}

/// A holding together with the price it was valued at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedHolding {
    pub holding: AssetHolding,

    /// Unit price used; zero when the quote was unavailable
    pub current_unit_price: Decimal,

    /// `current_unit_price × max(quantity, 0)`
    pub current_value: Decimal,

    /// False when the price could not be resolved and zero was substituted
    pub price_available: bool,
}

/// Result of valuing a whole portfolio of holdings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Same order as the input holdings
    pub holdings: Vec<ValuedHolding>,
    pub total: Decimal,
}

impl Valuation {
    /// Holdings whose price fell back to zero.
    pub fn unpriced(&self) -> impl Iterator<Item = &ValuedHolding> {
        self.holdings.iter().filter(|h| !h.price_available)
    }
}
