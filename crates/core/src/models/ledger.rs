use serde::{Deserialize, Serialize};

use super::holding::AssetHolding;
use super::transaction::Transaction;

/// Everything recorded for one user. This is the unit the record store
/// loads and saves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserLedger {
    /// Cash transactions, in insertion order
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// Asset holdings, in insertion order; unique by `HoldingKey`
    #[serde(default)]
    pub holdings: Vec<AssetHolding>,
}

impl UserLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.holdings.is_empty()
    }
}
