//! Score how available a resource is over a target date range.
//!
//! A resource starts fully available (100%). Every committed session that
//! effectively overlaps the target removes its share of the target's
//! weekdays:
//!
//! ```text
//! availability -= overlap_weekdays / target_weekday_length * 100
//! ```
//!
//! Penalties accumulate across sessions and the final value is rounded and
//! clamped into `[0, 100]`, so heavily double-booked resources bottom out at 0.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{effective_overlap, DateRange};
use crate::error::{EngineError, Result};
use crate::model::{Resource, ResourceId, ResourceKind, Session};

/// The availability of one resource over a target range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub resource_id: ResourceId,
    pub resource_name: String,
    pub kind: ResourceKind,
    /// Always within `[0, 100]`.
    pub availability_percent: u8,
    /// Names of overlapping sessions, in the order the sessions were supplied.
    pub conflicting_session_names: Vec<String>,
    /// End date of the trainer's latest session. Always `None` for rooms.
    pub last_session_end_date: Option<NaiveDate>,
}

/// Score `resource` against `target`, given the sessions it is committed to.
///
/// `sessions` must be in the resource's link order; the conflict list keeps
/// that order. A resource without sessions is 100% available.
///
/// # Errors
/// Returns [`EngineError::InvalidDuration`] when `target_weekday_length` is 0.
pub fn score(
    resource: &Resource,
    target: &DateRange,
    target_weekday_length: u32,
    sessions: &[Session],
) -> Result<AvailabilityResult> {
    require_weekdays(target, target_weekday_length)?;

    let length = f64::from(target_weekday_length);
    let mut availability = 100.0_f64;
    let mut conflicting_session_names = Vec::new();

    for session in sessions {
        let Some(shared) = effective_overlap(target, &session.range) else {
            continue;
        };

        let overlap_weekdays = shared.weekdays();
        availability -= f64::from(overlap_weekdays) / length * 100.0;

        if overlap_weekdays != 0 {
            tracing::trace!(
                resource = %resource.id,
                session = %session.id,
                overlap_weekdays,
                "conflicting session"
            );
            conflicting_session_names.push(session.name.clone());
        }
    }

    let availability_percent = availability.round().clamp(0.0, 100.0) as u8;

    let last_session_end_date = if resource.is_trainer() {
        most_recent_end_date(sessions)
    } else {
        None
    };

    tracing::debug!(
        resource = %resource.id,
        availability_percent,
        conflicts = conflicting_session_names.len(),
        "scored resource"
    );

    Ok(AvailabilityResult {
        resource_id: resource.id.clone(),
        resource_name: resource.name.clone(),
        kind: resource.kind,
        availability_percent,
        conflicting_session_names,
        last_session_end_date,
    })
}

pub(crate) fn require_weekdays(target: &DateRange, target_weekday_length: u32) -> Result<()> {
    if target_weekday_length == 0 {
        return Err(EngineError::InvalidDuration(format!(
            "target range {}..{} has a weekday length of 0",
            target.start(),
            target.end()
        )));
    }
    Ok(())
}

/// The latest end date across `sessions`, or `None` when there are none.
pub fn most_recent_end_date(sessions: &[Session]) -> Option<NaiveDate> {
    sessions.iter().map(|s| s.range.end()).max()
}
