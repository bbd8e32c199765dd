//! Tests for resolving a session end date from a weekday-length.

use availability_engine::{resolve_end_date, EngineError};
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn five_days_from_monday_ends_friday() {
    assert_eq!(resolve_end_date(d("2024-01-01"), 5).unwrap(), d("2024-01-05"));
}

#[test]
fn one_day_on_a_weekday_is_the_start() {
    assert_eq!(resolve_end_date(d("2024-01-05"), 1).unwrap(), d("2024-01-05"));
}

#[test]
fn one_day_on_saturday_rolls_to_monday() {
    assert_eq!(resolve_end_date(d("2024-01-06"), 1).unwrap(), d("2024-01-08"));
}

#[test]
fn one_day_on_sunday_rolls_to_monday() {
    assert_eq!(resolve_end_date(d("2024-01-07"), 1).unwrap(), d("2024-01-08"));
}

#[test]
fn span_skips_the_weekend() {
    // Thu, Fri, Mon
    assert_eq!(resolve_end_date(d("2024-01-04"), 3).unwrap(), d("2024-01-08"));
}

#[test]
fn ten_days_spans_two_weeks() {
    assert_eq!(resolve_end_date(d("2024-01-01"), 10).unwrap(), d("2024-01-12"));
}

#[test]
fn weekend_start_counts_as_day_one() {
    // Starting on Saturday, the next weekday (Monday) already satisfies a
    // two-day length because the start itself is day 1.
    assert_eq!(resolve_end_date(d("2024-01-06"), 2).unwrap(), d("2024-01-08"));
}

#[test]
fn crosses_month_and_year_boundaries() {
    // Thu 28 Dec 2023 + 4 weekdays → Thu, Fri, Mon 1 Jan, Tue 2 Jan
    assert_eq!(resolve_end_date(d("2023-12-28"), 4).unwrap(), d("2024-01-02"));
}

#[test]
fn zero_length_is_rejected() {
    let err = resolve_end_date(d("2024-01-01"), 0).unwrap_err();
    assert!(matches!(err, EngineError::InvalidDuration(_)));
}

#[test]
fn resolved_end_is_always_a_weekday() {
    let start = d("2024-03-01");
    for offset in 0..14u64 {
        let day = start + chrono::Days::new(offset);
        for len in 1..=12 {
            let end = resolve_end_date(day, len).unwrap();
            assert!(availability_engine::is_weekday(end), "{} +{} → {}", day, len, end);
            assert!(end >= day);
        }
    }
}
