//! Error types for availability-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Empty schedule set: at least one schedule entry is needed to anchor a shift")]
    EmptyScheduleSet,

    #[error("Missing linked record: {kind} '{id}' does not exist")]
    MissingLinkedRecord { kind: &'static str, id: String },

    #[error("Missing start date: {0}")]
    MissingStartDate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl EngineError {
    pub(crate) fn missing(kind: &'static str, id: impl Into<String>) -> Self {
        EngineError::MissingLinkedRecord {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
