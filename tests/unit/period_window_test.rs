// Period key and window selection tests

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use salespulse::sales::services::filter_by_window;
use salespulse::sales::{Granularity, PeriodKey, PeriodWindow, SalesRecord};

fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn day(offset: u64) -> PeriodKey {
    PeriodKey::day(first_day() + Days::new(offset))
}

/// 30 consecutive daily records starting 2025-03-01
fn thirty_days() -> Vec<SalesRecord> {
    (0..30).map(|i| SalesRecord::empty(day(i))).collect()
}

#[test]
fn test_window_is_inclusive() {
    let records = thirty_days();
    // Day 5 through day 10
    let window = PeriodWindow::new(day(4), day(9));

    let selected = filter_by_window(&records, window);

    assert_eq!(selected.len(), 6);
    assert_eq!(selected[0].period, day(4));
    assert_eq!(selected[5].period, day(9));
    assert!(selected.windows(2).all(|w| w[0].period < w[1].period));
}

#[test]
fn test_reversed_window_is_empty() {
    let records = thirty_days();
    let window = PeriodWindow::new(day(9), day(4));

    assert!(window.is_reversed());
    assert!(filter_by_window(&records, window).is_empty());
}

#[test]
fn test_window_outside_data_is_empty() {
    let records = thirty_days();
    let window = PeriodWindow::new(day(40), day(50));

    assert!(filter_by_window(&records, window).is_empty());
}

#[test]
fn test_window_does_not_mutate_source() {
    let records = thirty_days();
    let before = records.clone();

    let _ = filter_by_window(&records, PeriodWindow::new(day(0), day(3)));

    assert_eq!(records, before);
}

#[test]
fn test_window_from_dates_buckets_by_granularity() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();

    let monthly = PeriodWindow::from_dates(start, end, Granularity::Monthly);
    assert_eq!(monthly.start.to_string(), "2025-01");
    assert_eq!(monthly.end.to_string(), "2025-03");

    let daily = PeriodWindow::from_dates(start, end, Granularity::Daily);
    assert_eq!(daily.start.to_string(), "2025-01-15");
    assert_eq!(daily.end.to_string(), "2025-03-02");
}

#[test]
fn test_period_key_parsing() {
    let month: PeriodKey = "2025-02".parse().unwrap();
    assert_eq!(month.granularity(), Granularity::Monthly);
    assert_eq!(month.end(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());

    let day: PeriodKey = "2024-02-29".parse().unwrap();
    assert_eq!(day.granularity(), Granularity::Daily);

    assert!("2025-13".parse::<PeriodKey>().is_err());
    assert!("yesterday".parse::<PeriodKey>().is_err());
}

#[test]
fn test_monthly_prior_is_previous_calendar_month() {
    let march: PeriodKey = "2025-03".parse().unwrap();
    assert_eq!(march.prior().to_string(), "2025-02");

    let january: PeriodKey = "2025-01".parse().unwrap();
    assert_eq!(january.prior().to_string(), "2024-12");
}

proptest! {
    #[test]
    fn test_window_selects_exactly_contained(a in 0u64..35, b in 0u64..35) {
        let records = thirty_days();
        let window = PeriodWindow::new(day(a), day(b));

        let selected = filter_by_window(&records, window);
        let expected: Vec<&SalesRecord> =
            records.iter().filter(|r| window.contains(&r.period)).collect();

        prop_assert_eq!(selected.len(), expected.len());
        for (got, want) in selected.iter().zip(expected) {
            prop_assert_eq!(got, want);
        }
        if a > b {
            prop_assert!(selected.is_empty());
        }
    }
}
