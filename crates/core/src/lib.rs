pub mod errors;
pub mod logging;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use errors::CoreError;
use models::{
    analytics::{CashflowOverview, CategoryTotal},
    holding::{AssetHolding, HoldingKey, Valuation},
    ledger::UserLedger,
    net_worth::{NetWorthPoint, NetWorthSnapshot},
    period::PeriodSummary,
    transaction::{Transaction, TransactionKind},
};
use services::{
    aggregation_service::AggregationService,
    ledger_service::{LedgerService, UpsertOutcome},
    net_worth_service::NetWorthService,
    price_service::PriceResolver,
    valuation_service::ValuationService,
};
use storage::store::{normalize_user, RecordStore};

/// Main entry point: one signed-in user's ledger plus the services that
/// operate on it.
///
/// The dashboard owns no ambient state. Prices are resolved per call
/// through the `PriceResolver` passed in, and the ledger is only written
/// back to the store on `save()`.
#[must_use]
pub struct Dashboard<S: RecordStore> {
    store: S,
    user: String,
    ledger: UserLedger,
    ledger_service: LedgerService,
    aggregation_service: AggregationService,
    valuation_service: ValuationService,
    net_worth_service: NetWorthService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl<S: RecordStore> std::fmt::Debug for Dashboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("user", &self.user)
            .field("transactions", &self.ledger.transactions.len())
            .field("holdings", &self.ledger.holdings.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl<S: RecordStore> Dashboard<S> {
    /// Load `user`'s ledger from `store`. Unknown users start empty.
    pub fn open(store: S, user: &str) -> Result<Self, CoreError> {
        let user = normalize_user(user)?;
        let ledger = store.load(&user)?;
        tracing::info!(
            "Opened ledger for {user} ({} transactions, {} holdings)",
            ledger.transactions.len(),
            ledger.holdings.len()
        );
        Ok(Self {
            store,
            user,
            ledger,
            ledger_service: LedgerService::new(),
            aggregation_service: AggregationService::new(),
            valuation_service: ValuationService::new(),
            net_worth_service: NetWorthService::new(),
            dirty: false,
        })
    }

    /// Write the ledger back to the store and clear the unsaved-changes flag.
    pub fn save(&mut self) -> Result<(), CoreError> {
        self.store.save(&self.user, &self.ledger)?;
        self.dirty = false;
        Ok(())
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn ledger(&self) -> &UserLedger {
        &self.ledger
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check if there are mutations not yet saved.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a new income or expense. Returns its id.
    pub fn add_transaction(
        &mut self,
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Result<Uuid, CoreError> {
        let tx = Transaction::new(date, kind, category, description, amount);
        let id = self.ledger_service.add_transaction(&mut self.ledger, tx)?;
        self.dirty = true;
        tracing::info!("Added {kind} of {amount} on {date} for {}", self.user);
        Ok(id)
    }

    /// Replace an existing transaction (all fields).
    pub fn update_transaction(
        &mut self,
        id: Uuid,
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Result<(), CoreError> {
        self.ledger_service.update_transaction(
            &mut self.ledger,
            id,
            date,
            kind,
            category.into(),
            description.into(),
            amount,
        )?;
        self.dirty = true;
        tracing::info!("Updated transaction {id} for {}", self.user);
        Ok(())
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Result<Transaction, CoreError> {
        let removed = self.ledger_service.remove_transaction(&mut self.ledger, id)?;
        self.dirty = true;
        tracing::info!("Removed transaction {id} for {}", self.user);
        Ok(removed)
    }

    #[must_use]
    pub fn get_transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.ledger.transactions.iter().find(|t| t.id == id)
    }

    /// All transactions, newest first.
    #[must_use]
    pub fn transactions(&self) -> Vec<&Transaction> {
        self.ledger_service.get_transactions(&self.ledger)
    }

    /// Transactions of one kind, newest first.
    #[must_use]
    pub fn transactions_by_kind(&self, kind: TransactionKind) -> Vec<&Transaction> {
        self.transactions()
            .into_iter()
            .filter(|t| t.kind == kind)
            .collect()
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Insert a holding or replace the one with the same identity key.
    pub fn upsert_holding(&mut self, holding: AssetHolding) -> Result<UpsertOutcome, CoreError> {
        let outcome = self.ledger_service.upsert_holding(&mut self.ledger, holding)?;
        self.dirty = true;
        tracing::info!("Holding {outcome:?} for {}", self.user);
        Ok(outcome)
    }

    pub fn remove_holding(&mut self, key: &HoldingKey) -> Result<AssetHolding, CoreError> {
        let removed = self.ledger_service.remove_holding(&mut self.ledger, key)?;
        self.dirty = true;
        tracing::info!("Removed holding {} for {}", removed.name, self.user);
        Ok(removed)
    }

    /// Holdings in insertion order.
    #[must_use]
    pub fn holdings(&self) -> &[AssetHolding] {
        &self.ledger.holdings
    }

    // ── Cash flow ───────────────────────────────────────────────────

    /// Monthly totals with running balance, oldest month first.
    #[must_use]
    pub fn period_summaries(&self) -> Vec<PeriodSummary> {
        self.aggregation_service.aggregate(&self.ledger.transactions)
    }

    /// Monthly totals over transactions dated within `from..=to`.
    /// The running balance carries everything recorded before `from`, so
    /// `cumulative_balance` matches the unfiltered view.
    pub fn period_summaries_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PeriodSummary>, CoreError> {
        if from > to {
            return Err(CoreError::ValidationError(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }
        let transactions = &self.ledger.transactions;
        let opening = self.aggregation_service.balance_before(transactions, from);
        let selected = self.aggregation_service.in_range(transactions, from, to);
        Ok(self.aggregation_service.aggregate_from(&selected, opening))
    }

    #[must_use]
    pub fn cashflow_overview(&self) -> CashflowOverview {
        self.aggregation_service.overview(&self.ledger.transactions)
    }

    #[must_use]
    pub fn category_totals(&self, kind: TransactionKind) -> Vec<CategoryTotal> {
        self.aggregation_service
            .category_totals(&self.ledger.transactions, kind)
    }

    // ── Assets & net worth ──────────────────────────────────────────

    /// Value all holdings at current prices. Unpriceable holdings count
    /// as zero; see `Valuation::unpriced`.
    pub async fn valuate(&self, resolver: &PriceResolver) -> Valuation {
        self.valuation_service
            .valuate(&self.ledger.holdings, resolver)
            .await
    }

    /// Current cash balance + current asset value.
    pub async fn snapshot(&self, resolver: &PriceResolver) -> NetWorthSnapshot {
        let valuation = self.valuate(resolver).await;
        self.net_worth_service
            .compose(&self.period_summaries(), valuation.total)
    }

    /// Net worth per month, using today's asset value for every month.
    pub async fn net_worth_series(&self, resolver: &PriceResolver) -> Vec<NetWorthPoint> {
        let valuation = self.valuate(resolver).await;
        self.net_worth_service
            .time_series(&self.period_summaries(), valuation.total)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// The ledger as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to export ledger: {e}")))
    }
}
