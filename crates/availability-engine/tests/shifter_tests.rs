//! Tests for re-anchoring schedule entries on a new session start date.

use availability_engine::shifter::{shift, shift_days};
use availability_engine::{DateTimeRange, EngineError, ScheduleEntry};
use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn entry(id: &str, start: &str, end: &str) -> ScheduleEntry {
    ScheduleEntry {
        id: id.to_string(),
        session_id: "ses-1".to_string(),
        range: DateTimeRange::new(ts(start), ts(end)).unwrap(),
        trainer: Some("trainer-1".to_string()),
        room: Some("room-1".to_string()),
        event_type: "Training day".to_string(),
    }
}

fn three_day_schedule() -> Vec<ScheduleEntry> {
    vec![
        entry("e1", "2024-01-08T08:00:00+01:00", "2024-01-08T17:00:00+01:00"),
        entry("e2", "2024-01-09T09:30:00+01:00", "2024-01-09T16:00:00+01:00"),
        entry("e3", "2024-01-11T08:00:00+01:00", "2024-01-11T12:00:00+01:00"),
    ]
}

#[test]
fn shift_moves_every_entry_by_the_same_days() {
    let shifted = shift(d("2024-01-15"), &three_day_schedule()).unwrap();

    assert_eq!(shifted[0].range.start(), ts("2024-01-15T08:00:00+01:00"));
    assert_eq!(shifted[0].range.end(), ts("2024-01-15T17:00:00+01:00"));
    assert_eq!(shifted[1].range.start(), ts("2024-01-16T09:30:00+01:00"));
    assert_eq!(shifted[2].range.start(), ts("2024-01-18T08:00:00+01:00"));
    assert_eq!(shifted[2].range.end(), ts("2024-01-18T12:00:00+01:00"));
}

#[test]
fn shift_backwards() {
    let entries = three_day_schedule();
    assert_eq!(shift_days(d("2024-01-01"), &entries).unwrap(), -7);

    let shifted = shift(d("2024-01-01"), &entries).unwrap();
    assert_eq!(shifted[0].range.start(), ts("2024-01-01T08:00:00+01:00"));
    assert_eq!(shifted[2].range.start(), ts("2024-01-04T08:00:00+01:00"));
}

#[test]
fn zero_shift_is_identity() {
    let entries = three_day_schedule();
    let anchor = entries[0].range.start().date_naive();
    assert_eq!(shift(anchor, &entries).unwrap(), entries);
}

#[test]
fn shift_preserves_time_of_day_and_metadata() {
    let entries = three_day_schedule();
    let shifted = shift(d("2024-02-05"), &entries).unwrap();

    for (before, after) in entries.iter().zip(&shifted) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.trainer, after.trainer);
        assert_eq!(before.room, after.room);
        assert_eq!(before.event_type, after.event_type);
        assert_eq!(before.range.start().hour(), after.range.start().hour());
        assert_eq!(before.range.start().minute(), after.range.start().minute());
        assert_eq!(before.range.start().offset(), after.range.start().offset());
        assert_eq!(
            before.range.end() - before.range.start(),
            after.range.end() - after.range.start()
        );
    }
}

#[test]
fn shift_preserves_pairwise_gaps() {
    let entries = three_day_schedule();
    let shifted = shift(d("2024-03-20"), &entries).unwrap();

    for i in 0..entries.len() {
        for j in 0..entries.len() {
            assert_eq!(
                shifted[j].range.start() - shifted[i].range.start(),
                entries[j].range.start() - entries[i].range.start()
            );
        }
    }
}

#[test]
fn anchor_uses_the_entry_local_date() {
    // 00:30 at +02:00 is still the previous day in UTC; the local calendar
    // date is what anchors the shift.
    let entries = vec![entry(
        "late",
        "2024-06-10T00:30:00+02:00",
        "2024-06-10T02:00:00+02:00",
    )];
    assert_eq!(shift_days(d("2024-06-11"), &entries).unwrap(), 1);

    let shifted = shift(d("2024-06-11"), &entries).unwrap();
    assert_eq!(shifted[0].range.start(), ts("2024-06-11T00:30:00+02:00"));
}

#[test]
fn empty_schedule_is_rejected() {
    assert_eq!(shift(d("2024-01-01"), &[]), Err(EngineError::EmptyScheduleSet));
    assert_eq!(shift_days(d("2024-01-01"), &[]), Err(EngineError::EmptyScheduleSet));
}

#[test]
fn output_keeps_input_order() {
    let shifted = shift(d("2024-01-22"), &three_day_schedule()).unwrap();
    let ids: Vec<_> = shifted.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2", "e3"]);
}
