use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::{AssetHolding, HoldingKey, PricingSource};
use crate::models::ledger::UserLedger;
use crate::models::transaction::{Transaction, TransactionKind};

/// What `upsert_holding` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// Record CRUD on a user's ledger, with input validation.
///
/// This is the boundary: everything that reaches the aggregation and
/// valuation services has been checked here. No I/O.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Validate, normalize and append a transaction. Returns its id.
    pub fn add_transaction(&self, ledger: &mut UserLedger, tx: Transaction) -> Result<Uuid, CoreError> {
        let tx = Self::normalize_transaction(tx)?;
        let id = tx.id;
        ledger.transactions.push(tx);
        Ok(id)
    }

    /// Replace every field of an existing transaction. The id is preserved.
    #[allow(clippy::too_many_arguments)]
    pub fn update_transaction(
        &self,
        ledger: &mut UserLedger,
        id: Uuid,
        date: NaiveDate,
        kind: TransactionKind,
        category: String,
        description: String,
        amount: Decimal,
    ) -> Result<(), CoreError> {
        let idx = Self::transaction_index(ledger, id)?;
        let updated = Self::normalize_transaction(Transaction {
            id,
            date,
            kind,
            category,
            description,
            amount,
        })?;
        ledger.transactions[idx] = updated;
        Ok(())
    }

    /// Remove a transaction by id and return it.
    pub fn remove_transaction(&self, ledger: &mut UserLedger, id: Uuid) -> Result<Transaction, CoreError> {
        let idx = Self::transaction_index(ledger, id)?;
        Ok(ledger.transactions.remove(idx))
    }

    /// Transactions, newest first (ties keep insertion order).
    pub fn get_transactions<'a>(&self, ledger: &'a UserLedger) -> Vec<&'a Transaction> {
        let mut txs: Vec<&Transaction> = ledger.transactions.iter().collect();
        txs.sort_by(|a, b| b.date.cmp(&a.date));
        txs
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Insert a holding, or replace the one with the same
    /// `(asset_type, name, symbol)` in place.
    pub fn upsert_holding(&self, ledger: &mut UserLedger, holding: AssetHolding) -> Result<UpsertOutcome, CoreError> {
        let holding = Self::normalize_holding(holding)?;
        let key = holding.key();
        match ledger.holdings.iter().position(|h| h.key() == key) {
            Some(idx) => {
                ledger.holdings[idx] = holding;
                Ok(UpsertOutcome::Replaced)
            }
            None => {
                ledger.holdings.push(holding);
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    /// Remove the holding with this identity key and return it.
    ///
    /// `key` is normalized like a stored holding, so the key of the holding
    /// as it was passed to `upsert_holding` also matches.
    pub fn remove_holding(&self, ledger: &mut UserLedger, key: &HoldingKey) -> Result<AssetHolding, CoreError> {
        let key = Self::normalize_key(key);
        let idx = ledger
            .holdings
            .iter()
            .position(|h| h.key() == key)
            .ok_or_else(|| {
                CoreError::RecordNotFound(format!(
                    "holding {} / {} / {}",
                    key.asset_type, key.name, key.symbol
                ))
            })?;
        Ok(ledger.holdings.remove(idx))
    }

    // ── Validation ──────────────────────────────────────────────────

    /// Rules:
    /// - amount must not be negative
    /// - category must not be blank
    fn normalize_transaction(mut tx: Transaction) -> Result<Transaction, CoreError> {
        if tx.amount < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "Transaction amount must not be negative (got {})",
                tx.amount
            )));
        }
        tx.category = tx.category.trim().to_string();
        tx.description = tx.description.trim().to_string();
        if tx.category.is_empty() {
            return Err(CoreError::ValidationError("Transaction category must not be empty".into()));
        }
        Ok(tx)
    }

    /// Rules:
    /// - name must not be blank
    /// - quantity and manual price must not be negative
    /// - external sources need a pricing key
    /// - manual source needs a positive unit price
    ///
    /// Crypto keys are lower-cased (CoinCap ids), equity keys upper-cased
    /// (tickers).
    fn normalize_holding(mut holding: AssetHolding) -> Result<AssetHolding, CoreError> {
        holding.name = normalize_name(&holding.name);
        holding.symbol = normalize_symbol(&holding.symbol);
        holding.pricing_key = holding.pricing_key.trim().to_string();

        if holding.name.is_empty() {
            return Err(CoreError::ValidationError("Holding name must not be empty".into()));
        }
        if holding.quantity < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "Quantity of {} must not be negative (got {})",
                holding.name, holding.quantity
            )));
        }
        if holding.manual_unit_price < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "Unit price of {} must not be negative (got {})",
                holding.name, holding.manual_unit_price
            )));
        }

        match holding.pricing_source {
            PricingSource::Manual => {
                if holding.manual_unit_price <= Decimal::ZERO {
                    return Err(CoreError::ValidationError(format!(
                        "Manually priced holding {} needs a unit price above zero",
                        holding.name
                    )));
                }
                holding.pricing_key.clear();
            }
            source => {
                if holding.pricing_key.is_empty() {
                    return Err(CoreError::ValidationError(format!(
                        "Holding {} priced by {source} needs a pricing key",
                        holding.name
                    )));
                }
                holding.pricing_key = match source {
                    PricingSource::ExternalCrypto => holding.pricing_key.to_lowercase(),
                    _ => holding.pricing_key.to_uppercase(),
                };
            }
        }

        Ok(holding)
    }

    fn normalize_key(key: &HoldingKey) -> HoldingKey {
        HoldingKey {
            asset_type: key.asset_type,
            name: normalize_name(&key.name),
            symbol: normalize_symbol(&key.symbol),
        }
    }

    fn transaction_index(ledger: &UserLedger, id: Uuid) -> Result<usize, CoreError> {
        ledger
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::RecordNotFound(format!("transaction {id}")))
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}

fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
