//! Error types for socialcal.

use thiserror::Error;

use crate::calendar::CalendarId;
use crate::event::EventId;

/// Errors that can occur in socialcal operations.
#[derive(Error, Debug)]
pub enum SocialCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(CalendarId),

    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("Recurrence parse error: {0}")]
    RecurrenceParse(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for socialcal operations.
pub type SocialCalResult<T> = Result<T, SocialCalError>;
