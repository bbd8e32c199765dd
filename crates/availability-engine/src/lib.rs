//! # availability-engine
//!
//! Weekday-aware availability scoring and schedule shifting for training
//! sessions.
//!
//! Given a candidate date range and a pool of trainers and rooms, each already
//! committed to some sessions, the engine scores how available every resource
//! is over that range and lists the sessions that conflict. It also resolves a
//! session's end date from a weekday-counted duration, and re-anchors a
//! session's schedule entries when its start date moves.
//!
//! Everything here is a pure function over records fetched beforehand through
//! [`SchedulingStore`]; nothing is persisted.
//!
//! ## Modules
//!
//! - [`calendar`] — `DateRange`, weekday counting, interval overlap
//! - [`end_date`] — End date from a start date and a weekday-length
//! - [`availability`] — Per-resource availability percentage and conflicts
//! - [`ranker`] — Stable most-available-first ordering
//! - [`shifter`] — Uniform day shift of schedule entries
//! - [`model`] — Resources, sessions, schedule entries, trainings, requests
//! - [`store`] — The datastore collaborator trait and an in-memory dataset
//! - [`planner`] — Caller-facing operations built on the above
//! - [`error`] — Error types

pub mod availability;
pub mod calendar;
pub mod end_date;
pub mod error;
pub mod model;
pub mod planner;
pub mod ranker;
pub mod shifter;
pub mod store;

pub use availability::{most_recent_end_date, score, AvailabilityResult};
pub use calendar::{count_weekdays, effective_overlap, is_weekday, overlap, DateRange};
pub use end_date::resolve_end_date;
pub use end_date::resolve_end_date as resolve_session_end_date;
pub use error::EngineError;
pub use model::{
    DateTimeRange, RequestStatus, Resource, ResourceKind, ScheduleEntry, Session, Training,
    TrainingRequest,
};
pub use planner::{
    browse_availability, compute_availability, compute_availability_with, eligible_trainers,
    plan_request, reschedule_session, session_trainers, Candidate, PlannerOptions,
};
pub use ranker::rank;
pub use shifter::shift as shift_schedule;
pub use store::{Dataset, SchedulingStore};
