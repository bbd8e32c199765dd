//! Strongly typed records supplied by the datastore collaborator.
//!
//! Records are read-only inputs to a single computation. Dates on sessions and
//! requests are normalized to calendar dates on the way in, whatever time
//! component the store attached to them.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::calendar::DateRange;
use crate::error::{EngineError, Result};

pub type ResourceId = String;
pub type SessionId = String;
pub type TrainingId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Trainer,
    Room,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Trainer => f.write_str("trainer"),
            ResourceKind::Room => f.write_str("room"),
        }
    }
}

/// A trainer or room that sessions can be booked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub kind: ResourceKind,
    /// Trainings this resource may deliver. Only meaningful for trainers.
    #[serde(default)]
    pub qualified_for: Vec<TrainingId>,
    /// Sessions referencing this resource, in link order.
    #[serde(default)]
    pub session_ids: Vec<SessionId>,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            qualified_for: Vec::new(),
            session_ids: Vec::new(),
        }
    }

    pub fn is_trainer(&self) -> bool {
        self.kind == ResourceKind::Trainer
    }

    pub fn can_deliver(&self, training_id: &str) -> bool {
        self.is_trainer() && self.qualified_for.iter().any(|t| t == training_id)
    }
}

/// A committed training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord", into = "SessionRecord")]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub training_id: TrainingId,
    pub range: DateRange,
    pub resource_ids: Vec<ResourceId>,
    pub main_trainer: Option<ResourceId>,
    pub second_trainer: Option<ResourceId>,
    pub schedule_ids: Vec<String>,
}

impl Session {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        training_id: impl Into<String>,
        range: DateRange,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            training_id: training_id.into(),
            range,
            resource_ids: Vec::new(),
            main_trainer: None,
            second_trainer: None,
            schedule_ids: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SessionRecord {
    id: SessionId,
    name: String,
    #[serde(default)]
    training_id: TrainingId,
    #[serde(deserialize_with = "calendar_date")]
    start_date: NaiveDate,
    #[serde(deserialize_with = "calendar_date")]
    end_date: NaiveDate,
    #[serde(default)]
    resource_ids: Vec<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    main_trainer: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    second_trainer: Option<ResourceId>,
    #[serde(default)]
    schedule_ids: Vec<String>,
}

impl TryFrom<SessionRecord> for Session {
    type Error = EngineError;

    fn try_from(r: SessionRecord) -> Result<Self> {
        let mut resource_ids: Vec<ResourceId> = Vec::with_capacity(r.resource_ids.len());
        for id in r.resource_ids {
            if !resource_ids.contains(&id) {
                resource_ids.push(id);
            }
        }
        Ok(Session {
            range: DateRange::new(r.start_date, r.end_date)?,
            id: r.id,
            name: r.name,
            training_id: r.training_id,
            resource_ids,
            main_trainer: r.main_trainer,
            second_trainer: r.second_trainer,
            schedule_ids: r.schedule_ids,
        })
    }
}

impl From<Session> for SessionRecord {
    fn from(s: Session) -> Self {
        SessionRecord {
            id: s.id,
            name: s.name,
            training_id: s.training_id,
            start_date: s.range.start(),
            end_date: s.range.end(),
            resource_ids: s.resource_ids,
            main_trainer: s.main_trainer,
            second_trainer: s.second_trainer,
            schedule_ids: s.schedule_ids,
        }
    }
}

/// A zone-aware timestamp range. `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateTimeRange")]
pub struct DateTimeRange {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

#[derive(Deserialize)]
struct RawDateTimeRange {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl TryFrom<RawDateTimeRange> for DateTimeRange {
    type Error = EngineError;

    fn try_from(raw: RawDateTimeRange) -> Result<Self> {
        DateTimeRange::new(raw.start, raw.end)
    }
}

impl DateTimeRange {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Result<Self> {
        if start > end {
            return Err(EngineError::InvalidRange(format!(
                "start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }
}

/// One block of a session's timetable (e.g. a single training day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: String,
    pub session_id: SessionId,
    pub range: DateTimeRange,
    #[serde(default)]
    pub trainer: Option<ResourceId>,
    #[serde(default)]
    pub room: Option<ResourceId>,
    pub event_type: String,
}

/// A training from the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Training {
    pub id: TrainingId,
    pub name: String,
    /// Duration in weekdays.
    pub duration_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    New,
    SessionCreated,
    Cancelled,
}

/// A customer request for a training, waiting to be planned into a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRequest {
    pub id: String,
    pub training_id: TrainingId,
    #[serde(default, deserialize_with = "optional_calendar_date")]
    pub expected_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
}

/// Parse a stored date value into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and `YYYY-MM-DD HH:MM[:SS]`
/// (with either a space or a `T` separator). Timestamps are reduced to the
/// calendar date in their own offset.
///
/// # Errors
/// Returns [`EngineError::InvalidRange`] for anything else.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt.date());
        }
    }

    Err(EngineError::InvalidRange(format!("unparseable date '{}'", s)))
}

fn calendar_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}

fn optional_calendar_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_calendar_date(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
