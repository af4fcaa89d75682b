//! Error types for backend calls and the booking workflow.

use rehearsal_engine::{Conflict, EngineError, Rejection, RoomId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request failed local validation and was never sent.
    #[error("Booking rejected: {0}")]
    Rejected(#[from] Rejection),

    /// The snapshot already shows a reservation in the requested slot.
    #[error("Room {room} is already booked for that time ({} conflicting reservation(s))", .conflicts.len())]
    SlotTaken { room: RoomId, conflicts: Vec<Conflict> },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Not authenticated: log in again")]
    Unauthorized,

    #[error("Not allowed: {0}")]
    Forbidden(String),

    /// The backend answered with a non-success status. `message` is the
    /// backend's own `erro` text when it sent one.
    #[error("Backend error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid backend URL '{0}': expected http:// or https://")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
