//! Calendar-date ranges, weekday counting, and interval overlap.
//!
//! A [`DateRange`] is an inclusive span of calendar days with `start <= end`
//! enforced at construction (and at deserialization). Weekdays are Monday
//! through Friday; Saturday and Sunday are never counted.
//!
//! Overlap comes in two flavours:
//!
//! - [`overlap`] returns the plain intersection, including an intersection
//!   that collapses to a single shared day.
//! - [`effective_overlap`] only returns intersections with `start < end`.
//!   This is the one availability scoring uses, so two ranges that share
//!   exactly one boundary day are not a conflict.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = EngineError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build a range, failing with [`EngineError::InvalidRange`] when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(EngineError::InvalidRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days in the range, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Number of Monday–Friday days in the range.
    pub fn weekdays(&self) -> u32 {
        weekdays_between(self.start, self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True when the range spans more than a single day.
    pub fn has_positive_length(&self) -> bool {
        self.start < self.end
    }
}

/// True for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count the weekdays in `[start, end]`, both ends included.
///
/// # Errors
/// Returns [`EngineError::InvalidRange`] when `start > end`.
pub fn count_weekdays(start: NaiveDate, end: NaiveDate) -> Result<u32> {
    let range = DateRange::new(start, end)?;
    Ok(range.weekdays())
}

// Whole weeks contribute five weekdays each; the trailing partial week is
// walked by weekday index so no date arithmetic can overflow.
fn weekdays_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let total_days = (end - start).num_days() + 1;
    let full_weeks = total_days / 7;
    let remainder = total_days % 7;

    let first = i64::from(start.weekday().num_days_from_monday());
    let partial = (0..remainder).filter(|i| (first + i) % 7 < 5).count() as i64;

    (full_weeks * 5 + partial) as u32
}

/// The intersection of two ranges, or `None` when they do not touch.
///
/// Ranges that meet on a single day produce a one-day range. Symmetric in
/// its arguments.
pub fn overlap(a: &DateRange, b: &DateRange) -> Option<DateRange> {
    if a.start <= b.end && a.end >= b.start {
        Some(DateRange {
            start: a.start.max(b.start),
            end: a.end.min(b.end),
        })
    } else {
        None
    }
}

/// The intersection of two ranges when it spans more than one day.
///
/// A single shared boundary day is not counted. Sessions that start on the
/// same day as the target but end the same day therefore score as no
/// conflict; see the pinned tests in `calendar_tests.rs`.
pub fn effective_overlap(a: &DateRange, b: &DateRange) -> Option<DateRange> {
    overlap(a, b).filter(DateRange::has_positive_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn closed_form_matches_day_walk() {
        let start = d(2024, 1, 1);
        for len in 0..60 {
            let end = start + chrono::Days::new(len);
            let walked = start
                .iter_days()
                .take_while(|day| *day <= end)
                .filter(|day| is_weekday(*day))
                .count() as u32;
            assert_eq!(weekdays_between(start, end), walked, "len {}", len);
        }
    }

    #[test]
    fn deserialize_rejects_inverted_range() {
        let json = r#"{"start":"2024-01-05","end":"2024-01-01"}"#;
        assert!(serde_json::from_str::<DateRange>(json).is_err());
    }
}
