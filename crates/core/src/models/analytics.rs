use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// Headline cash-flow figures shown above the monthly chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CashflowOverview {
    /// Sum of all income amounts
    pub total_income: Decimal,

    /// Sum of all expense amounts (positive magnitude)
    pub total_expense: Decimal,

    /// `total_income - total_expense`
    pub balance: Decimal,

    /// Signed total of the most recent month, zero with no transactions
    pub latest_period_total: Decimal,

    /// Mean signed total over the last (up to) three months
    pub trailing_average: Decimal,
}

/// Total of one category for a single transaction kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub kind: TransactionKind,
    pub category: String,
    pub total: Decimal,
}
