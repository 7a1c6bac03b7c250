// Property-based tests for KPI aggregation
//
// Period totals, placeholder defaults, growth and ratio helpers, and
// snapshot idempotence.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use salespulse::sales::services::{
    average_ticket, current_period_totals, growth_percent, kpi_snapshot, period_totals,
    prior_period_totals, refund_rate,
};
use salespulse::sales::{PeriodKey, SalesRecord};

fn march(day: u32) -> PeriodKey {
    PeriodKey::day(NaiveDate::from_ymd_opt(2025, 3, day).unwrap())
}

fn record_strategy() -> impl Strategy<Value = SalesRecord> {
    (
        1u32..=28,
        0i64..10_000_000,
        0i64..5_000,
        0i64..20_000,
        0i64..1_000,
        0i64..100_000,
    )
        .prop_map(|(day, revenue, tx, units, new, refunds)| {
            SalesRecord::new(
                march(day),
                Decimal::new(revenue, 2),
                tx,
                units,
                new,
                Decimal::new(refunds, 2),
            )
        })
}

proptest! {
    #[test]
    fn test_totals_equal_field_sums(records in prop::collection::vec(record_strategy(), 1..60)) {
        let key = records[0].period;
        let matching: Vec<&SalesRecord> = records.iter().filter(|r| r.period == key).collect();

        let totals = current_period_totals(&records, key);

        prop_assert_eq!(totals.approved_amount, matching.iter().map(|r| r.approved_amount).sum::<Decimal>());
        prop_assert_eq!(totals.transaction_count, matching.iter().map(|r| r.transaction_count).sum::<i64>());
        prop_assert_eq!(totals.units_sold, matching.iter().map(|r| r.units_sold).sum::<i64>());
        prop_assert_eq!(totals.new_customers, matching.iter().map(|r| r.new_customers).sum::<i64>());
        prop_assert_eq!(totals.refund_amount, matching.iter().map(|r| r.refund_amount).sum::<Decimal>());
    }

    #[test]
    fn test_monthly_key_sums_every_day(records in prop::collection::vec(record_strategy(), 1..60)) {
        let month = PeriodKey::month(2025, 3).unwrap();
        let totals = period_totals(&records, month).unwrap();

        prop_assert_eq!(totals.approved_amount, records.iter().map(|r| r.approved_amount).sum::<Decimal>());
        prop_assert_eq!(totals.units_sold, records.iter().map(|r| r.units_sold).sum::<i64>());
    }

    #[test]
    fn test_absent_key_yields_zero_record(records in prop::collection::vec(record_strategy(), 0..30)) {
        let absent = PeriodKey::month(2030, 1).unwrap();
        let totals = current_period_totals(&records, absent);

        prop_assert_eq!(totals.approved_amount, Decimal::ZERO);
        prop_assert_eq!(totals.units_sold, 0);
        prop_assert_eq!(totals.new_customers, 0);
        prop_assert_eq!(totals.refund_amount, Decimal::ZERO);
        prop_assert_eq!(totals.transaction_count, 1);
    }

    #[test]
    fn test_snapshot_is_idempotent(records in prop::collection::vec(record_strategy(), 0..40), day in 1u32..=28) {
        let key = march(day);

        let first = kpi_snapshot(&records, key);
        let second = kpi_snapshot(&records, key);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_growth_sign_follows_difference(current in 0i64..1_000_000, prior in 1i64..1_000_000) {
        let growth = growth_percent(Decimal::from(current), Decimal::from(prior));

        prop_assert_eq!(growth.is_sign_negative() && !growth.is_zero(), current < prior);
        prop_assert_eq!(growth.is_zero(), current == prior);
    }

    #[test]
    fn test_refund_rate_bounded(revenue in 1i64..1_000_000, share in 0u8..=100) {
        let revenue = Decimal::from(revenue);
        let refunds = revenue * Decimal::from(share) / Decimal::ONE_HUNDRED;

        let rate = refund_rate(refunds, revenue);

        prop_assert!(rate >= Decimal::ZERO);
        prop_assert!(rate <= Decimal::ONE_HUNDRED);
    }
}

#[test]
fn test_growth_percent_examples() {
    assert_eq!(growth_percent(dec!(110), dec!(100)), dec!(10));
    assert_eq!(growth_percent(dec!(90), dec!(100)), dec!(-10));
    assert_eq!(growth_percent(dec!(100), dec!(100)), dec!(0));
}

#[test]
fn test_average_ticket_examples() {
    assert_eq!(average_ticket(dec!(1000), 0), Decimal::ZERO);
    assert_eq!(average_ticket(dec!(1000), 10), dec!(100));
}

#[test]
fn test_refund_rate_examples() {
    assert_eq!(refund_rate(dec!(50), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(refund_rate(dec!(50), dec!(200)), dec!(25));
}

#[test]
fn test_prior_placeholder_for_first_period() {
    let records = vec![SalesRecord::new(march(1), dec!(500), 5, 5, 5, dec!(0))];

    // Daily prior is 30 days back: 2025-01-30
    let prior = prior_period_totals(&records, march(1));

    assert_eq!(prior.period.to_string(), "2025-01-30");
    assert_eq!(prior.approved_amount, Decimal::ONE);
    assert_eq!(prior.transaction_count, 1);
    assert_eq!(prior.units_sold, 1);
    assert_eq!(prior.new_customers, 1);
}

#[test]
fn test_daily_prior_offset() {
    let prior_day = PeriodKey::day(NaiveDate::from_ymd_opt(2025, 2, 13).unwrap());
    let records = vec![
        SalesRecord::new(prior_day, dec!(200), 4, 10, 2, dec!(0)),
        SalesRecord::new(march(15), dec!(300), 6, 12, 3, dec!(0)),
    ];

    let snapshot = kpi_snapshot(&records, march(15));

    assert!(snapshot.prior_period_present);
    assert_eq!(snapshot.prior_period, prior_day);
    assert_eq!(snapshot.revenue_growth, dec!(50));
    assert_eq!(snapshot.units_growth, dec!(20));
    assert_eq!(snapshot.new_customer_growth, dec!(50));
    assert_eq!(snapshot.average_ticket, dec!(50));
}
