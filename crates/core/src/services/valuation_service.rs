use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::models::holding::{AssetHolding, PricingSource, Valuation, ValuedHolding};
use crate::services::price_service::PriceResolver;

/// Values a set of holdings at current prices.
///
/// Pure apart from the quote lookups: takes the holdings, returns a new
/// `Valuation`, keeps nothing between calls.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Value every holding and sum the total.
    ///
    /// 1. Group the external holdings' keys by pricing source.
    /// 2. One `resolve_batch` per source (distinct keys only).
    /// 3. Unresolvable keys price at zero for every holding that shares them;
    ///    the rest of the portfolio is unaffected.
    /// 4. Negative quantities count as zero.
    /// 5. A holding whose value or share of the total overflows is valued at
    ///    zero and reported as unpriced.
    ///
    /// Output keeps the input order.
    pub async fn valuate(&self, holdings: &[AssetHolding], resolver: &PriceResolver) -> Valuation {
        // Request-scoped: lives for this call only.
        let mut keys_by_source: BTreeMap<PricingSource, Vec<String>> = BTreeMap::new();
        for holding in holdings.iter().filter(|h| h.pricing_source.is_external()) {
            keys_by_source
                .entry(holding.pricing_source)
                .or_default()
                .push(holding.pricing_key.clone());
        }

        let mut prices: HashMap<(PricingSource, String), Option<Decimal>> = HashMap::new();
        for (source, keys) in keys_by_source {
            for (key, outcome) in resolver.resolve_batch(source, &keys).await {
                let price = match outcome {
                    Ok(price) => Some(price),
                    Err(e) => {
                        tracing::warn!("Valuing {source} holdings at zero: {e}");
                        None
                    }
                };
                prices.insert((source, key), price);
            }
        }

        let mut total = Decimal::ZERO;
        let valued: Vec<ValuedHolding> = holdings
            .iter()
            .map(|holding| {
                let unit_price = match holding.pricing_source {
                    PricingSource::Manual => Some(holding.manual_unit_price),
                    source => prices
                        .get(&(source, holding.pricing_key.clone()))
                        .copied()
                        .flatten(),
                };
                let mut valued = Self::value_holding(holding, unit_price);
                match total.checked_add(valued.current_value) {
                    Some(sum) => total = sum,
                    None => {
                        tracing::warn!(
                            "Portfolio total overflows at {}; valuing it at zero",
                            holding.name
                        );
                        valued = Self::value_holding(holding, None);
                    }
                }
                valued
            })
            .collect();

        Valuation {
            holdings: valued,
            total,
        }
    }

    /// Value a single holding given its resolved unit price (`None` means
    /// the price was unavailable).
    ///
    /// A value that does not fit in a `Decimal` counts as unavailable.
    pub fn value_holding(holding: &AssetHolding, unit_price: Option<Decimal>) -> ValuedHolding {
        let quantity = holding.quantity.max(Decimal::ZERO);
        let priced = unit_price.map(|p| p.max(Decimal::ZERO)).and_then(|price| {
            match price.checked_mul(quantity) {
                Some(value) => Some((price, value)),
                None => {
                    tracing::warn!(
                        "Value of {} overflows ({price} x {quantity}); valuing it at zero",
                        holding.name
                    );
                    None
                }
            }
        });

        match priced {
            Some((current_unit_price, current_value)) => ValuedHolding {
                holding: holding.clone(),
                current_unit_price,
                current_value,
                price_available: true,
            },
            None => ValuedHolding {
                holding: holding.clone(),
                current_unit_price: Decimal::ZERO,
                current_value: Decimal::ZERO,
                price_available: false,
            },
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
