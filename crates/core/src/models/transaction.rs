use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a cash transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money coming in (salary, refunds, ...)
    Income,
    /// Money going out
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "Income"),
            TransactionKind::Expense => write!(f, "Expense"),
        }
    }
}

/// A single recorded cash transaction.
///
/// `amount` is always a non-negative magnitude; the direction comes from
/// `kind`. Use [`Transaction::signed_amount`] when aggregating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable handle used for edit/delete
    pub id: Uuid,

    /// Date of the transaction (daily granularity)
    pub date: NaiveDate,

    /// Income or Expense
    pub kind: TransactionKind,

    /// Free-text category (e.g. "Salary", "Groceries")
    pub category: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Magnitude, never negative
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind,
            category: category.into(),
            description: description.into(),
            amount,
        }
    }

    pub fn income(date: NaiveDate, category: impl Into<String>, amount: Decimal) -> Self {
        Self::new(date, TransactionKind::Income, category, "", amount)
    }

    pub fn expense(date: NaiveDate, category: impl Into<String>, amount: Decimal) -> Self {
        Self::new(date, TransactionKind::Expense, category, "", amount)
    }

    /// `+amount` for income, `-amount` for expense.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}
