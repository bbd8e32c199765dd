//! Tests for weekday counting and date-range overlap.

use availability_engine::calendar::{count_weekdays, effective_overlap, is_weekday, overlap, DateRange};
use availability_engine::EngineError;
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(d(start), d(end)).unwrap()
}

// ── Weekday counting ────────────────────────────────────────────────────────

#[test]
fn single_weekday_counts_one() {
    // 2024-01-03 is a Wednesday
    assert_eq!(count_weekdays(d("2024-01-03"), d("2024-01-03")).unwrap(), 1);
}

#[test]
fn single_weekend_day_counts_zero() {
    assert_eq!(count_weekdays(d("2024-01-06"), d("2024-01-06")).unwrap(), 0);
    assert_eq!(count_weekdays(d("2024-01-07"), d("2024-01-07")).unwrap(), 0);
}

#[test]
fn monday_to_friday_is_five() {
    assert_eq!(count_weekdays(d("2024-01-01"), d("2024-01-05")).unwrap(), 5);
}

#[test]
fn full_week_including_weekend_is_five() {
    assert_eq!(count_weekdays(d("2024-01-01"), d("2024-01-07")).unwrap(), 5);
}

#[test]
fn span_across_weekend() {
    // Thu 4 Jan .. Tue 9 Jan → Thu, Fri, Mon, Tue
    assert_eq!(count_weekdays(d("2024-01-04"), d("2024-01-09")).unwrap(), 4);
}

#[test]
fn weekend_only_span_is_zero() {
    assert_eq!(count_weekdays(d("2024-01-06"), d("2024-01-07")).unwrap(), 0);
}

#[test]
fn long_span_over_leap_day() {
    // February 2024 has 29 days and 21 weekdays.
    assert_eq!(count_weekdays(d("2024-02-01"), d("2024-02-29")).unwrap(), 21);
}

#[test]
fn inverted_range_is_rejected() {
    let err = count_weekdays(d("2024-01-05"), d("2024-01-01")).unwrap_err();
    assert!(matches!(err, EngineError::InvalidRange(_)));
}

#[test]
fn is_weekday_matches_calendar() {
    assert!(is_weekday(d("2024-01-01")));
    assert!(is_weekday(d("2024-01-05")));
    assert!(!is_weekday(d("2024-01-06")));
    assert!(!is_weekday(d("2024-01-07")));
}

#[test]
fn date_range_reports_days_and_weekdays() {
    let r = range("2024-01-01", "2024-01-14");
    assert_eq!(r.days(), 14);
    assert_eq!(r.weekdays(), 10);
    assert!(r.contains(d("2024-01-10")));
    assert!(!r.contains(d("2024-01-15")));
}

#[test]
fn date_range_new_rejects_inverted_dates() {
    assert!(matches!(
        DateRange::new(d("2024-02-01"), d("2024-01-31")),
        Err(EngineError::InvalidRange(_))
    ));
}

// ── Overlap ─────────────────────────────────────────────────────────────────

#[test]
fn contained_range_overlaps_fully() {
    let target = range("2024-01-01", "2024-01-05");
    let session = range("2024-01-03", "2024-01-04");
    assert_eq!(overlap(&target, &session), Some(session));
}

#[test]
fn partial_overlap_is_clipped() {
    let a = range("2024-01-01", "2024-01-05");
    let b = range("2024-01-04", "2024-01-10");
    assert_eq!(overlap(&a, &b), Some(range("2024-01-04", "2024-01-05")));
}

#[test]
fn disjoint_ranges_do_not_overlap() {
    let a = range("2024-01-01", "2024-01-05");
    let b = range("2024-01-08", "2024-01-12");
    assert_eq!(overlap(&a, &b), None);
    assert_eq!(effective_overlap(&a, &b), None);
}

#[test]
fn overlap_is_symmetric() {
    let a = range("2024-01-01", "2024-01-05");
    let b = range("2024-01-04", "2024-01-10");
    assert_eq!(overlap(&a, &b), overlap(&b, &a));
    assert_eq!(effective_overlap(&a, &b), effective_overlap(&b, &a));
}

#[test]
fn shared_boundary_day_is_an_intersection_but_not_effective() {
    // Session ends on the day the target starts.
    let target = range("2024-01-05", "2024-01-12");
    let session = range("2024-01-01", "2024-01-05");

    assert_eq!(overlap(&target, &session), Some(range("2024-01-05", "2024-01-05")));
    assert_eq!(effective_overlap(&target, &session), None);
}

#[test]
fn single_day_session_on_target_start_is_not_effective() {
    // Current behaviour: a one-day session on the first day of the target
    // never counts as a conflict, even though it occupies a full weekday.
    let target = range("2024-01-01", "2024-01-05");
    let session = range("2024-01-01", "2024-01-01");

    assert!(overlap(&target, &session).is_some());
    assert_eq!(effective_overlap(&target, &session), None);
}
