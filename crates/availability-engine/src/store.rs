//! The datastore collaborator and an in-memory implementation of it.
//!
//! The engine never performs I/O itself. Callers fetch everything a
//! computation needs through [`SchedulingStore`] first, then hand plain
//! records to the scoring and shifting functions. A reference that resolves
//! to nothing surfaces as [`EngineError::MissingLinkedRecord`].

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::model::{Resource, ScheduleEntry, Session, Training, TrainingRequest};

/// Read access to the records the planner works on.
pub trait SchedulingStore {
    /// All resources, trainers and rooms alike, in store order.
    fn resources(&self) -> Result<Vec<Resource>>;

    fn resource(&self, resource_id: &str) -> Result<Resource>;

    /// Sessions linked to a resource, in the store's natural link order.
    fn sessions_for_resource(&self, resource_id: &str) -> Result<Vec<Session>>;

    fn session(&self, session_id: &str) -> Result<Session>;

    /// Schedule entries of a session, sorted ascending by start.
    fn schedule_entries_for_session(&self, session_id: &str) -> Result<Vec<ScheduleEntry>>;

    /// Weekday-length of a training.
    fn training_duration(&self, training_id: &str) -> Result<u32>;

    fn request(&self, request_id: &str) -> Result<TrainingRequest>;
}

/// A complete snapshot of the planning tables, usually loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub schedules: Vec<ScheduleEntry>,
    #[serde(default)]
    pub trainings: Vec<Training>,
    #[serde(default)]
    pub requests: Vec<TrainingRequest>,
}

impl Dataset {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn find_session(&self, session_id: &str) -> Result<&Session> {
        self.sessions
            .iter()
            .find(|s| s.id == session_id)
            .ok_or_else(|| EngineError::missing("session", session_id))
    }

    fn find_resource(&self, resource_id: &str) -> Result<&Resource> {
        self.resources
            .iter()
            .find(|r| r.id == resource_id)
            .ok_or_else(|| EngineError::missing("resource", resource_id))
    }
}

impl SchedulingStore for Dataset {
    fn resources(&self) -> Result<Vec<Resource>> {
        Ok(self.resources.clone())
    }

    fn resource(&self, resource_id: &str) -> Result<Resource> {
        self.find_resource(resource_id).cloned()
    }

    /// Uses the resource's own `session_ids` links when present. Otherwise the
    /// links are derived from the sessions naming this resource, in dataset
    /// order.
    fn sessions_for_resource(&self, resource_id: &str) -> Result<Vec<Session>> {
        let resource = self.find_resource(resource_id)?;

        if resource.session_ids.is_empty() {
            return Ok(self
                .sessions
                .iter()
                .filter(|s| s.resource_ids.iter().any(|id| id == resource_id))
                .cloned()
                .collect());
        }

        resource
            .session_ids
            .iter()
            .map(|id| self.find_session(id).cloned())
            .collect()
    }

    fn session(&self, session_id: &str) -> Result<Session> {
        self.find_session(session_id).cloned()
    }

    fn schedule_entries_for_session(&self, session_id: &str) -> Result<Vec<ScheduleEntry>> {
        let session = self.find_session(session_id)?;

        let mut entries: Vec<ScheduleEntry> = if session.schedule_ids.is_empty() {
            self.schedules
                .iter()
                .filter(|e| e.session_id == session_id)
                .cloned()
                .collect()
        } else {
            session
                .schedule_ids
                .iter()
                .map(|id| {
                    self.schedules
                        .iter()
                        .find(|e| &e.id == id)
                        .cloned()
                        .ok_or_else(|| EngineError::missing("schedule entry", id.as_str()))
                })
                .collect::<Result<_>>()?
        };

        entries.sort_by_key(|e| e.range.start());
        Ok(entries)
    }

    fn training_duration(&self, training_id: &str) -> Result<u32> {
        self.trainings
            .iter()
            .find(|t| t.id == training_id)
            .map(|t| t.duration_days)
            .ok_or_else(|| EngineError::missing("training", training_id))
    }

    fn request(&self, request_id: &str) -> Result<TrainingRequest> {
        self.requests
            .iter()
            .find(|r| r.id == request_id)
            .cloned()
            .ok_or_else(|| EngineError::missing("request", request_id))
    }
}
