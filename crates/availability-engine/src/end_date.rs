//! Resolve a session's end date from its start date and weekday-length.

use chrono::NaiveDate;

use crate::calendar::is_weekday;
use crate::error::{EngineError, Result};

/// Resolve the end date of a session lasting `weekday_length` business days.
///
/// `start` is day 1 of the span. Each following weekday consumes one unit of
/// the remaining length; weekend days are skipped. If the span ends on a
/// weekend (only possible when `start` itself falls on one and the length is
/// 1), the date rolls forward to the next Monday.
///
/// # Errors
/// Returns [`EngineError::InvalidDuration`] when `weekday_length` is 0, and
/// [`EngineError::InvalidRange`] if the walk runs past the last representable
/// date.
pub fn resolve_end_date(start: NaiveDate, weekday_length: u32) -> Result<NaiveDate> {
    if weekday_length < 1 {
        return Err(EngineError::InvalidDuration(
            "weekday length must be at least 1".to_string(),
        ));
    }

    let mut date = start;
    let mut remaining = weekday_length - 1;

    while remaining > 0 {
        date = next_day(date)?;
        if is_weekday(date) {
            remaining -= 1;
        }
    }

    while !is_weekday(date) {
        date = next_day(date)?;
    }

    Ok(date)
}

fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| EngineError::InvalidRange(format!("no calendar day after {}", date)))
}
