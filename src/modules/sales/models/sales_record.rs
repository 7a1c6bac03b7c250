use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::period::{Granularity, PeriodKey};
use crate::core::{AppError, Result};

/// Sales totals for a single period bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Period bucket (month or day)
    pub period: PeriodKey,
    /// Sum of approved sale amounts
    pub approved_amount: Decimal,
    /// Number of approved transactions
    pub transaction_count: i64,
    /// Number of product units sold
    pub units_sold: i64,
    /// Customers buying for the first time
    pub new_customers: i64,
    /// Sum of refunded amounts
    pub refund_amount: Decimal,
}

impl SalesRecord {
    pub fn new(
        period: PeriodKey,
        approved_amount: Decimal,
        transaction_count: i64,
        units_sold: i64,
        new_customers: i64,
        refund_amount: Decimal,
    ) -> Self {
        Self {
            period,
            approved_amount,
            transaction_count,
            units_sold,
            new_customers,
            refund_amount,
        }
    }

    /// Zero-filled record used when a period has no data.
    /// Transaction count is 1 so ratios over it stay defined.
    pub fn empty(period: PeriodKey) -> Self {
        Self::new(period, Decimal::ZERO, 1, 0, 0, Decimal::ZERO)
    }

    /// Stand-in for a missing prior period: every field is 1 so growth
    /// figures never divide by zero.
    pub fn placeholder(period: PeriodKey) -> Self {
        Self::new(period, Decimal::ONE, 1, 1, 1, Decimal::ONE)
    }

    /// Like `empty`, but with a true zero transaction count; the starting
    /// point for summation.
    pub(crate) fn zero(period: PeriodKey) -> Self {
        Self::new(period, Decimal::ZERO, 0, 0, 0, Decimal::ZERO)
    }

    /// Adds every numeric field of `other` into `self`.
    ///
    /// # Errors
    /// Returns a data-source error, leaving `self` unchanged, when a field
    /// overflows.
    pub fn accumulate(&mut self, other: &SalesRecord) -> Result<()> {
        let period = self.period;
        let overflow = || AppError::data_source(format!("Sales totals for {} overflow", period));

        let approved_amount = self
            .approved_amount
            .checked_add(other.approved_amount)
            .ok_or_else(overflow)?;
        let transaction_count = self
            .transaction_count
            .checked_add(other.transaction_count)
            .ok_or_else(overflow)?;
        let units_sold = self
            .units_sold
            .checked_add(other.units_sold)
            .ok_or_else(overflow)?;
        let new_customers = self
            .new_customers
            .checked_add(other.new_customers)
            .ok_or_else(overflow)?;
        let refund_amount = self
            .refund_amount
            .checked_add(other.refund_amount)
            .ok_or_else(overflow)?;

        self.approved_amount = approved_amount;
        self.transaction_count = transaction_count;
        self.units_sold = units_sold;
        self.new_customers = new_customers;
        self.refund_amount = refund_amount;
        Ok(())
    }
}

/// Bound on the summed magnitude of a series' amounts. Window totals,
/// rounding and the chart axis headroom all stay representable below it.
fn max_series_amount() -> Decimal {
    Decimal::MAX / Decimal::ONE_THOUSAND
}

/// Checks that summing any subset of `records` cannot overflow
fn check_magnitude(records: &[SalesRecord]) -> Result<()> {
    let limit = max_series_amount();
    let mut amounts = Decimal::ZERO;
    let mut counts: i64 = 0;

    for record in records {
        amounts = amounts
            .checked_add(record.approved_amount.abs())
            .and_then(|sum| sum.checked_add(record.refund_amount.abs()))
            .filter(|sum| *sum <= limit)
            .ok_or_else(|| {
                AppError::data_source(format!(
                    "Sales amounts up to {} exceed the supported range",
                    record.period
                ))
            })?;

        counts = [record.transaction_count, record.units_sold, record.new_customers]
            .iter()
            .try_fold(counts, |sum, count| sum.checked_add(count.checked_abs()?))
            .ok_or_else(|| {
                AppError::data_source(format!(
                    "Sales counts up to {} exceed the supported range",
                    record.period
                ))
            })?;
    }

    Ok(())
}

/// Validated, time-ordered sales data of a single granularity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalesSeries {
    records: Vec<SalesRecord>,
}

impl SalesSeries {
    /// Sorts the records by period and merges rows sharing a period key.
    ///
    /// # Errors
    /// Returns a validation error if daily and monthly records are mixed,
    /// and a data-source error if the figures are too large to aggregate.
    pub fn new(mut records: Vec<SalesRecord>) -> Result<Self> {
        if let Some(first) = records.first() {
            let granularity = first.period.granularity();
            if let Some(odd) = records
                .iter()
                .find(|r| r.period.granularity() != granularity)
            {
                return Err(AppError::validation(format!(
                    "Mixed period granularity: {} and {}",
                    first.period, odd.period
                )));
            }
        }

        check_magnitude(&records)?;
        records.sort_by_key(|r| r.period);

        let before = records.len();
        let mut merged: Vec<SalesRecord> = Vec::with_capacity(before);
        for record in records {
            match merged.last_mut() {
                Some(last) if last.period == record.period => last.accumulate(&record)?,
                _ => merged.push(record),
            }
        }

        if merged.len() != before {
            warn!(
                merged_rows = before - merged.len(),
                "Duplicate period keys in sales data were summed"
            );
        }

        Ok(Self { records: merged })
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn granularity(&self) -> Option<Granularity> {
        self.records.first().map(|r| r.period.granularity())
    }

    pub fn first_period(&self) -> Option<PeriodKey> {
        self.records.first().map(|r| r.period)
    }

    pub fn last_period(&self) -> Option<PeriodKey> {
        self.records.last().map(|r| r.period)
    }
}
