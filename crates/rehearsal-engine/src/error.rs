//! Error types for rehearsal-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time range: {start} is not before {end}")]
    InvalidRange { start: String, end: String },

    #[error("No same-day one-hour slot starts at {0}")]
    EndTimeOverflow(String),

    #[error("Room name must not be blank")]
    BlankRoomName,
}

pub type Result<T> = std::result::Result<T, EngineError>;
