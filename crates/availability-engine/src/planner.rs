//! Caller-facing planning operations.
//!
//! These functions tie the pure scoring and shifting primitives to a
//! [`SchedulingStore`]: they fetch every record a computation needs up front,
//! then run the computation without further store access.
//!
//! - [`compute_availability`] — score and rank a set of candidate resources
//! - [`browse_availability`] — score every trainer and room over a date range
//! - [`plan_request`] — turn a training request into ranked options and a
//!   session draft
//! - [`reschedule_session`] — shift a session's schedule entries onto its
//!   current start date
//! - [`session_trainers`] / [`eligible_trainers`] — trainer bookkeeping

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::availability::{self, AvailabilityResult};
use crate::calendar::{count_weekdays, DateRange};
use crate::end_date::resolve_end_date;
use crate::error::{EngineError, Result};
use crate::model::{Resource, ResourceId, ResourceKind, ScheduleEntry, Session, TrainingId};
use crate::ranker::rank;
use crate::shifter;
use crate::store::SchedulingStore;

/// Candidate counts at or above this are scored on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Local time a session draft starts.
pub const DEFAULT_DAY_START: NaiveTime = hour(8);
/// Local time a session draft ends.
pub const DEFAULT_DAY_END: NaiveTime = hour(17);

const fn hour(h: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(h, 0, 0) {
        Some(t) => t,
        None => panic!("hour out of range"),
    }
}

/// A resource together with the sessions it is committed to.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub resource: Resource,
    pub sessions: Vec<Session>,
}

/// Tunables shared by the planning operations.
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    pub parallel_threshold: usize,
    /// Zone used to place session-draft timestamps.
    pub timezone: Tz,
    /// Local time a session day starts.
    pub day_start: NaiveTime,
    /// Local time a session day ends.
    pub day_end: NaiveTime,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            timezone: chrono_tz::Europe::Amsterdam,
            day_start: DEFAULT_DAY_START,
            day_end: DEFAULT_DAY_END,
        }
    }
}

/// Parse an IANA timezone name.
///
/// # Errors
/// Returns [`EngineError::InvalidTimezone`] for unknown names.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

/// Score and rank `candidates` against `target`.
///
/// Uses [`DEFAULT_PARALLEL_THRESHOLD`]; see [`compute_availability_with`].
pub fn compute_availability(
    target: &DateRange,
    target_weekday_length: u32,
    candidates: &[Candidate],
) -> Result<Vec<AvailabilityResult>> {
    compute_availability_with(
        target,
        target_weekday_length,
        candidates,
        DEFAULT_PARALLEL_THRESHOLD,
    )
}

/// Score and rank `candidates` against `target`, fanning out across the
/// rayon pool once there are at least `parallel_threshold` candidates.
///
/// Each candidate is scored independently, so the parallel and sequential
/// paths produce identical output.
///
/// # Errors
/// Returns [`EngineError::InvalidDuration`] when `target_weekday_length` is 0,
/// even when there are no candidates.
pub fn compute_availability_with(
    target: &DateRange,
    target_weekday_length: u32,
    candidates: &[Candidate],
    parallel_threshold: usize,
) -> Result<Vec<AvailabilityResult>> {
    availability::require_weekdays(target, target_weekday_length)?;

    let score_one =
        |c: &Candidate| availability::score(&c.resource, target, target_weekday_length, &c.sessions);

    let parallel = candidates.len() >= parallel_threshold;
    tracing::debug!(candidates = candidates.len(), parallel, "computing availability");

    let results: Vec<AvailabilityResult> = if parallel {
        candidates.par_iter().map(score_one).collect::<Result<_>>()?
    } else {
        candidates.iter().map(score_one).collect::<Result<_>>()?
    };

    Ok(rank(results))
}

/// Fetch each resource's sessions from the store.
pub fn load_candidates<S: SchedulingStore + ?Sized>(
    store: &S,
    resources: Vec<Resource>,
) -> Result<Vec<Candidate>> {
    resources
        .into_iter()
        .map(|resource| {
            let sessions = store.sessions_for_resource(&resource.id)?;
            Ok(Candidate { resource, sessions })
        })
        .collect()
}

/// Ranked availability of every trainer and every room over a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityOverview {
    pub target: DateRange,
    pub weekday_length: u32,
    pub trainers: Vec<AvailabilityResult>,
    pub rooms: Vec<AvailabilityResult>,
}

/// Score all trainers and rooms in the store over `target`.
///
/// The target weekday-length is the number of weekdays in `target`.
///
/// # Errors
/// Returns [`EngineError::InvalidDuration`] when `target` contains no weekdays.
pub fn browse_availability<S: SchedulingStore + ?Sized>(
    store: &S,
    target: &DateRange,
    options: &PlannerOptions,
) -> Result<AvailabilityOverview> {
    let weekday_length = target.weekdays();
    let (trainers, rooms): (Vec<Resource>, Vec<Resource>) =
        store.resources()?.into_iter().partition(Resource::is_trainer);

    let trainers = compute_availability_with(
        target,
        weekday_length,
        &load_candidates(store, trainers)?,
        options.parallel_threshold,
    )?;
    let rooms = compute_availability_with(
        target,
        weekday_length,
        &load_candidates(store, rooms)?,
        options.parallel_threshold,
    )?;

    Ok(AvailabilityOverview {
        target: *target,
        weekday_length,
        trainers,
        rooms,
    })
}

/// Trainers qualified to deliver `training_id`, in input order.
pub fn eligible_trainers<'a>(resources: &'a [Resource], training_id: &str) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|r| r.can_deliver(training_id))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    New,
}

/// A session ready to be created by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub training_id: TrainingId,
    pub request_id: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub weekday_length: u32,
    pub status: SessionStatus,
}

/// Everything needed to turn a request into a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPlan {
    pub request_id: String,
    pub training_id: TrainingId,
    /// End date derived from the training duration, before any override.
    pub proposed_end: NaiveDate,
    pub range: DateRange,
    pub weekday_length: u32,
    /// Qualified trainers, most available first.
    pub trainers: Vec<AvailabilityResult>,
    /// All rooms, most available first.
    pub rooms: Vec<AvailabilityResult>,
    pub draft: SessionDraft,
}

/// Plan a training request.
///
/// The start date is `start_override`, falling back to the request's expected
/// start. The end date is `end_override`, falling back to the end resolved
/// from the training's duration. The weekday-length used for scoring is then
/// recounted from the confirmed range.
///
/// # Errors
/// - [`EngineError::MissingStartDate`] when neither start is available.
/// - [`EngineError::InvalidRange`] when the end precedes the start.
/// - [`EngineError::InvalidDuration`] when the training duration is 0 or the
///   confirmed range has no weekdays.
/// - [`EngineError::MissingLinkedRecord`] for dangling references.
pub fn plan_request<S: SchedulingStore + ?Sized>(
    store: &S,
    request_id: &str,
    start_override: Option<NaiveDate>,
    end_override: Option<NaiveDate>,
    options: &PlannerOptions,
) -> Result<SessionPlan> {
    let request = store.request(request_id)?;
    let start = start_override
        .or(request.expected_start_date)
        .ok_or_else(|| {
            EngineError::MissingStartDate(format!(
                "request '{}' has no expected start date",
                request.id
            ))
        })?;

    let duration = store.training_duration(&request.training_id)?;
    let proposed_end = resolve_end_date(start, duration)?;
    let range = DateRange::new(start, end_override.unwrap_or(proposed_end))?;
    let weekday_length = count_weekdays(range.start(), range.end())?;

    tracing::debug!(
        request = %request.id,
        %start,
        end = %range.end(),
        weekday_length,
        "planning request"
    );

    let resources = store.resources()?;
    let trainers: Vec<Resource> = eligible_trainers(&resources, &request.training_id)
        .into_iter()
        .cloned()
        .collect();
    let rooms: Vec<Resource> = resources
        .iter()
        .filter(|r| r.kind == ResourceKind::Room)
        .cloned()
        .collect();

    let trainers = compute_availability_with(
        &range,
        weekday_length,
        &load_candidates(store, trainers)?,
        options.parallel_threshold,
    )?;
    let rooms = compute_availability_with(
        &range,
        weekday_length,
        &load_candidates(store, rooms)?,
        options.parallel_threshold,
    )?;

    let draft = SessionDraft {
        training_id: request.training_id.clone(),
        request_id: request.id.clone(),
        start: local_timestamp(range.start(), options.day_start, options.timezone)?,
        end: local_timestamp(range.end(), options.day_end, options.timezone)?,
        weekday_length,
        status: SessionStatus::New,
    };

    Ok(SessionPlan {
        request_id: request.id,
        training_id: request.training_id,
        proposed_end,
        range,
        weekday_length,
        trainers,
        rooms,
        draft,
    })
}

fn local_timestamp(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<FixedOffset>> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| {
            EngineError::InvalidRange(format!("{} {} does not exist in {}", date, time, tz))
        })
}

/// Shift a session's schedule entries so the earliest lands on `anchor`,
/// defaulting to the session's current start date.
///
/// # Errors
/// Returns [`EngineError::EmptyScheduleSet`] when the session has no entries.
pub fn reschedule_session<S: SchedulingStore + ?Sized>(
    store: &S,
    session_id: &str,
    anchor: Option<NaiveDate>,
) -> Result<Vec<ScheduleEntry>> {
    let session = store.session(session_id)?;
    let entries = store.schedule_entries_for_session(&session.id)?;
    shifter::shift(anchor.unwrap_or(session.range.start()), &entries)
}

/// The `Trainers` set of a session derived from its trainer slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerAssignment {
    /// Main trainer first, then the second trainer.
    pub trainers: Vec<ResourceId>,
    /// Set when the second trainer duplicates the main trainer and the slot
    /// should be emptied.
    pub clear_second_trainer: bool,
}

pub fn session_trainers(main: Option<&str>, second: Option<&str>) -> TrainerAssignment {
    let mut trainers: Vec<ResourceId> = main.into_iter().map(str::to_string).collect();
    let mut clear_second_trainer = false;

    if let Some(second) = second {
        if main == Some(second) {
            clear_second_trainer = true;
        } else {
            trainers.push(second.to_string());
        }
    }

    TrainerAssignment {
        trainers,
        clear_second_trainer,
    }
}
