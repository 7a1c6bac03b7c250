//! KPI aggregation over periodic sales records.
//!
//! Every function here is pure: inputs are borrowed, nothing is cached, and
//! identical inputs always produce identical outputs.

use rust_decimal::Decimal;

use crate::modules::sales::models::{KpiSnapshot, PeriodKey, PeriodWindow, SalesRecord};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const TEN: Decimal = Decimal::TEN;

/// Sums the records falling inside `period_key`, or `None` when no record does.
///
/// A record matches when its key equals `period_key` or lies within it
/// (daily records inside a monthly key).
///
/// Sums saturate at the numeric limits; records from a [`SalesSeries`] never
/// reach them.
///
/// [`SalesSeries`]: crate::modules::sales::models::SalesSeries
pub fn period_totals(records: &[SalesRecord], period_key: PeriodKey) -> Option<SalesRecord> {
    let mut matched = false;
    let mut totals = SalesRecord::zero(period_key);

    for record in records.iter().filter(|r| period_key.contains(&r.period)) {
        totals.approved_amount = totals.approved_amount.saturating_add(record.approved_amount);
        totals.transaction_count = totals.transaction_count.saturating_add(record.transaction_count);
        totals.units_sold = totals.units_sold.saturating_add(record.units_sold);
        totals.new_customers = totals.new_customers.saturating_add(record.new_customers);
        totals.refund_amount = totals.refund_amount.saturating_add(record.refund_amount);
        matched = true;
    }

    matched.then_some(totals)
}

/// Totals for `period_key`; a zero-filled record with a transaction count
/// of 1 when the period has no data.
pub fn current_period_totals(records: &[SalesRecord], period_key: PeriodKey) -> SalesRecord {
    period_totals(records, period_key).unwrap_or_else(|| SalesRecord::empty(period_key))
}

/// Totals for the period preceding `period_key` (see [`PeriodKey::prior`]).
/// When that period has no data every field is 1, a placeholder that keeps
/// growth percentages finite.
pub fn prior_period_totals(records: &[SalesRecord], period_key: PeriodKey) -> SalesRecord {
    let prior = period_key.prior();
    period_totals(records, prior).unwrap_or_else(|| SalesRecord::placeholder(prior))
}

/// Percentage change from `prior` to `current`.
///
/// Contract: `prior` is expected to be non-zero (the placeholder rule in
/// [`prior_period_totals`] guarantees it). A zero prior, or an overflowing
/// result, yields 0 instead of a fault.
pub fn growth_percent(current: Decimal, prior: Decimal) -> Decimal {
    if prior.is_zero() {
        return Decimal::ZERO;
    }

    current
        .checked_sub(prior)
        .and_then(|delta| delta.checked_div(prior))
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Revenue per transaction; 0 when there are no transactions.
pub fn average_ticket(total_revenue: Decimal, total_transactions: i64) -> Decimal {
    if total_transactions <= 0 {
        return Decimal::ZERO;
    }

    total_revenue
        .checked_div(Decimal::from(total_transactions))
        .unwrap_or(Decimal::ZERO)
}

/// Refunds as a percentage of revenue; 0 when there is no revenue.
pub fn refund_rate(total_refunds: Decimal, total_revenue: Decimal) -> Decimal {
    if total_revenue <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    total_refunds
        .checked_div(total_revenue)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// The contiguous run of `records` whose keys lie in `window`, inclusive.
///
/// `records` must be sorted by period (as [`SalesSeries`] guarantees).
/// Reversed bounds select nothing.
///
/// [`SalesSeries`]: crate::modules::sales::models::SalesSeries
pub fn filter_by_window(records: &[SalesRecord], window: PeriodWindow) -> &[SalesRecord] {
    if window.is_reversed() {
        return &[];
    }

    let lo = records.partition_point(|r| r.period < window.start);
    let hi = records.partition_point(|r| r.period <= window.end);

    if hi <= lo {
        return &[];
    }
    &records[lo..hi]
}

/// Rounds to the nearest multiple of ten (ties to even), as headline
/// revenue and refund figures are shown. Amounts too close to the decimal
/// limit to round up are returned as is.
pub fn round_to_tens(amount: Decimal) -> Decimal {
    (amount / TEN).round().checked_mul(TEN).unwrap_or(amount)
}

/// Computes the full KPI snapshot for `period_key`.
pub fn kpi_snapshot(records: &[SalesRecord], period_key: PeriodKey) -> KpiSnapshot {
    let mut current = current_period_totals(records, period_key);
    current.approved_amount = round_to_tens(current.approved_amount);
    current.refund_amount = round_to_tens(current.refund_amount);

    let prior_key = period_key.prior();
    let prior_period_present = period_totals(records, prior_key).is_some();
    let prior = prior_period_totals(records, period_key);

    KpiSnapshot {
        period: period_key,
        prior_period: prior_key,
        revenue_growth: growth_percent(current.approved_amount, prior.approved_amount),
        units_growth: growth_percent(
            Decimal::from(current.units_sold),
            Decimal::from(prior.units_sold),
        ),
        new_customer_growth: growth_percent(
            Decimal::from(current.new_customers),
            Decimal::from(prior.new_customers),
        ),
        average_ticket: average_ticket(current.approved_amount, current.transaction_count),
        refund_rate: refund_rate(current.refund_amount, current.approved_amount),
        prior_period_present,
        current,
        prior,
    }
}
