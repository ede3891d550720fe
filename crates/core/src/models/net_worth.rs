use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::period::YearMonth;

/// Net worth at a single point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetWorthSnapshot {
    /// Cumulative balance of the latest month, or zero with no transactions
    pub cash_balance: Decimal,

    /// Current total value of all holdings
    pub assets_value: Decimal,

    /// `cash_balance + assets_value`
    pub net_worth: Decimal,
}

/// One point of the net worth chart.
///
/// `net_worth` uses today's asset valuation for every month; asset values
/// are not back-dated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetWorthPoint {
    pub period: YearMonth,
    pub cash_balance: Decimal,
    pub net_worth: Decimal,
}
