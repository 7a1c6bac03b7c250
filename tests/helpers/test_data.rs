// Test Data Factory
//
// Builds sales records with known totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use salespulse::sales::{PeriodKey, SalesRecord};

/// Date every test clock is pinned to
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
}

/// Test data factory for sales fixtures
pub struct SalesDataFactory;

impl SalesDataFactory {
    /// One record per month, January to March 2025
    ///
    /// | month   | revenue | tx  | units | new | refunds |
    /// |---------|---------|-----|-------|-----|---------|
    /// | 2025-01 |  90000  | 450 |  500  | 40  |   900   |
    /// | 2025-02 | 100000  | 500 |  600  | 50  |  2000   |
    /// | 2025-03 | 110000  | 550 |  660  | 45  |  2750   |
    pub fn quarter() -> Vec<SalesRecord> {
        vec![
            Self::month(1, 90_000, 450, 500, 40, 900),
            Self::month(2, 100_000, 500, 600, 50, 2_000),
            Self::month(3, 110_000, 550, 660, 45, 2_750),
        ]
    }

    /// A monthly record in 2025
    pub fn month(
        month: u32,
        revenue: i64,
        transactions: i64,
        units: i64,
        new_customers: i64,
        refunds: i64,
    ) -> SalesRecord {
        SalesRecord::new(
            PeriodKey::month(2025, month).unwrap(),
            Decimal::from(revenue),
            transactions,
            units,
            new_customers,
            Decimal::from(refunds),
        )
    }

    /// `days` consecutive daily records starting 2025-04-01, revenue 1000 × day number
    pub fn daily(days: u32) -> Vec<SalesRecord> {
        let first = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        (0..days)
            .map(|i| {
                let date = first + chrono::Days::new(i as u64);
                SalesRecord::new(
                    PeriodKey::day(date),
                    Decimal::from(1_000 * (i as i64 + 1)),
                    10,
                    12,
                    2,
                    Decimal::from(5),
                )
            })
            .collect()
    }
}
