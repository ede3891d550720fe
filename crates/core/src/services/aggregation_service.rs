use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::models::analytics::{CashflowOverview, CategoryTotal};
use crate::models::period::{PeriodSummary, YearMonth};
use crate::models::transaction::{Transaction, TransactionKind};

/// Number of trailing months averaged in `CashflowOverview::trailing_average`.
pub const TRAILING_PERIODS: usize = 3;

/// Turns a flat list of cash transactions into monthly figures.
///
/// Pure business logic, no I/O. Input order never affects the output.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Group transactions by calendar month.
    ///
    /// Returns one row per month that has transactions, oldest first, with a
    /// running `cumulative_balance`. The last row's cumulative balance equals
    /// the sum of every signed amount.
    pub fn aggregate(&self, transactions: &[Transaction]) -> Vec<PeriodSummary> {
        self.aggregate_from(transactions, Decimal::ZERO)
    }

    /// Same as [`aggregate`](Self::aggregate), with the running balance
    /// starting at `opening_balance` instead of zero.
    ///
    /// Sums saturate at the `Decimal` bounds rather than overflow.
    pub fn aggregate_from(&self, transactions: &[Transaction], opening_balance: Decimal) -> Vec<PeriodSummary> {
        #[derive(Default)]
        struct Totals {
            income: Decimal,
            expense: Decimal,
        }

        let mut by_period: BTreeMap<YearMonth, Totals> = BTreeMap::new();
        for tx in transactions {
            let totals = by_period.entry(YearMonth::from_date(tx.date)).or_default();
            match tx.kind {
                TransactionKind::Income => totals.income = totals.income.saturating_add(tx.amount),
                TransactionKind::Expense => totals.expense = totals.expense.saturating_add(tx.amount),
            }
        }

        let mut cumulative = opening_balance;
        by_period
            .into_iter()
            .map(|(period, totals)| {
                let total_signed = totals.income.saturating_sub(totals.expense);
                cumulative = cumulative.saturating_add(total_signed);
                PeriodSummary {
                    period,
                    total_signed,
                    income_total: totals.income,
                    expense_total: totals.expense,
                    cumulative_balance: cumulative,
                }
            })
            .collect()
    }

    /// Sum of signed amounts of the transactions dated before `date`.
    pub fn balance_before(&self, transactions: &[Transaction], date: NaiveDate) -> Decimal {
        transactions
            .iter()
            .filter(|t| t.date < date)
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.signed_amount()))
    }

    /// Headline figures: totals, balance, latest month and trailing average.
    pub fn overview(&self, transactions: &[Transaction]) -> CashflowOverview {
        let periods = self.aggregate(transactions);
        Self::overview_from_periods(&periods)
    }

    /// Same as [`overview`](Self::overview), from already aggregated months.
    pub fn overview_from_periods(periods: &[PeriodSummary]) -> CashflowOverview {
        let total_income = saturating_sum(periods.iter().map(|p| p.income_total));
        let total_expense = saturating_sum(periods.iter().map(|p| p.expense_total));
        let latest_period_total = periods
            .last()
            .map(|p| p.total_signed)
            .unwrap_or(Decimal::ZERO);

        let trailing = &periods[periods.len().saturating_sub(TRAILING_PERIODS)..];
        let trailing_average = if trailing.is_empty() {
            Decimal::ZERO
        } else {
            saturating_sum(trailing.iter().map(|p| p.total_signed)) / Decimal::from(trailing.len())
        };

        CashflowOverview {
            total_income,
            total_expense,
            balance: total_income.saturating_sub(total_expense),
            latest_period_total,
            trailing_average,
        }
    }

    /// Per-category totals for one kind, largest first (ties by name).
    pub fn category_totals(
        &self,
        transactions: &[Transaction],
        kind: TransactionKind,
    ) -> Vec<CategoryTotal> {
        let mut totals: HashMap<&str, Decimal> = HashMap::new();
        for tx in transactions.iter().filter(|t| t.kind == kind) {
            let total = totals.entry(tx.category.as_str()).or_insert(Decimal::ZERO);
            *total = total.saturating_add(tx.amount);
        }

        let mut rows: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                kind,
                category: category.to_string(),
                total,
            })
            .collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
        rows
    }

    /// Copies of the transactions dated within `from..=to`, in input order.
    pub fn in_range(&self, transactions: &[Transaction], from: NaiveDate, to: NaiveDate) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| t.date >= from && t.date <= to)
            .cloned()
            .collect()
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}
