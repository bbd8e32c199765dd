//! Re-anchor a session's schedule entries on a new start date.
//!
//! The earliest entry's calendar date is the anchor. Every entry is moved by
//! the same whole number of days, so time-of-day, offsets, durations, and the
//! gaps between entries are all preserved.

use chrono::{Duration, NaiveDate};

use crate::error::{EngineError, Result};
use crate::model::{DateTimeRange, ScheduleEntry};

/// Whole days between the earliest entry's date and `new_anchor_start`.
///
/// Negative when the session moved earlier.
///
/// # Errors
/// Returns [`EngineError::EmptyScheduleSet`] when `entries` is empty.
pub fn shift_days(new_anchor_start: NaiveDate, entries: &[ScheduleEntry]) -> Result<i64> {
    let first = entries.first().ok_or(EngineError::EmptyScheduleSet)?;
    let earliest = first.range.start().date_naive();
    Ok((new_anchor_start - earliest).num_days())
}

/// Shift every entry so the first one starts on `new_anchor_start`.
///
/// `entries` must be sorted ascending by start. The output keeps the input
/// order and the caller is responsible for persisting it.
///
/// # Errors
/// Returns [`EngineError::EmptyScheduleSet`] when `entries` is empty, or
/// [`EngineError::InvalidRange`] if a shifted timestamp is out of range.
pub fn shift(new_anchor_start: NaiveDate, entries: &[ScheduleEntry]) -> Result<Vec<ScheduleEntry>> {
    let days = shift_days(new_anchor_start, entries)?;
    tracing::debug!(days, entries = entries.len(), %new_anchor_start, "shifting schedule");

    if days == 0 {
        return Ok(entries.to_vec());
    }

    let offset = Duration::days(days);
    entries
        .iter()
        .map(|entry| {
            let moved = |ts: chrono::DateTime<chrono::FixedOffset>| {
                ts.checked_add_signed(offset).ok_or_else(|| {
                    EngineError::InvalidRange(format!(
                        "shifting {} by {} days leaves the supported range",
                        ts.to_rfc3339(),
                        days
                    ))
                })
            };
            let range = DateTimeRange::new(moved(entry.range.start())?, moved(entry.range.end())?)?;
            Ok(ScheduleEntry {
                range,
                ..entry.clone()
            })
        })
        .collect()
}
