use rust_decimal::Decimal;

use crate::models::net_worth::{NetWorthPoint, NetWorthSnapshot};
use crate::models::period::PeriodSummary;

/// Combines the cash side (monthly summaries) with the asset side (current
/// valuation total).
pub struct NetWorthService;

impl NetWorthService {
    pub fn new() -> Self {
        Self
    }

    /// Point-in-time net worth.
    ///
    /// Cash is the cumulative balance of the latest month (zero with no
    /// transactions). `period_summaries` must be in chronological order, as
    /// returned by `AggregationService::aggregate`.
    pub fn compose(&self, period_summaries: &[PeriodSummary], assets_total: Decimal) -> NetWorthSnapshot {
        let cash_balance = period_summaries
            .last()
            .map(|p| p.cumulative_balance)
            .unwrap_or(Decimal::ZERO);
        NetWorthSnapshot {
            cash_balance,
            assets_value: assets_total,
            net_worth: cash_balance.saturating_add(assets_total),
        }
    }

    /// Net worth per month.
    ///
    /// `assets_total` is today's valuation and is added to every month
    /// alike: there is no historical price source to back-date it. Sums
    /// saturate at the `Decimal` bounds.
    pub fn time_series(&self, period_summaries: &[PeriodSummary], assets_total: Decimal) -> Vec<NetWorthPoint> {
        period_summaries
            .iter()
            .map(|p| NetWorthPoint {
                period: p.period,
                cash_balance: p.cumulative_balance,
                net_worth: p.cumulative_balance.saturating_add(assets_total),
            })
            .collect()
    }
}

impl Default for NetWorthService {
    fn default() -> Self {
        Self::new()
    }
}
