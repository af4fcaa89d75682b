//! Local checks on a booking request before it is submitted.
//!
//! Validation is a pure function of the request and the policy. It runs before
//! the submission call so that an incomplete form never costs a round trip.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{default_end_time, format_time, hhmm_opt, TimeRange};
use crate::error::{EngineError, Result};
use crate::model::{Reservation, ReservationId, RoomId, UserId};

/// Participants the full booking form requires for an ensemble rehearsal.
pub const MIN_ENSEMBLE_PARTICIPANTS: usize = 5;

/// The booking form as the user filled it in. Unset fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "hhmm_opt")]
    pub start: Option<NaiveTime>,
    #[serde(default, with = "hhmm_opt")]
    pub end: Option<NaiveTime>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub participants: Vec<UserId>,
}

/// Which booking flow the request comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPolicy {
    /// Distinct participants required, if the flow tracks participants at all.
    pub min_participants: Option<usize>,
    /// When false, a missing end time defaults to the one-hour slot.
    pub require_end: bool,
}

impl BookingPolicy {
    /// Quick booking from the room board: an hour mark, no participant list.
    pub const fn quick() -> Self {
        Self {
            min_participants: None,
            require_end: false,
        }
    }

    /// The full rehearsal form: explicit interval and an ensemble of at least
    /// [`MIN_ENSEMBLE_PARTICIPANTS`].
    pub const fn ensemble() -> Self {
        Self {
            min_participants: Some(MIN_ENSEMBLE_PARTICIPANTS),
            require_end: true,
        }
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self::ensemble()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Label,
    Room,
    Date,
    Start,
    End,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Label => "label",
            Field::Room => "room",
            Field::Date => "date",
            Field::Start => "start time",
            Field::End => "end time",
        };
        f.write_str(name)
    }
}

/// Why a booking request cannot be submitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("missing required field: {0}")]
    MissingField(Field),

    #[error("end time {end} must be after start time {start}")]
    InvalidRange { start: String, end: String },

    #[error("no same-day one-hour slot starts at {0}")]
    NoDefaultEnd(String),

    #[error("insufficient participants: at least {required} required, got {actual}")]
    InsufficientParticipants { required: usize, actual: usize },
}

/// A request that passed validation, normalized for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidBooking {
    pub label: String,
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub range: TimeRange,
    pub note: Option<String>,
    /// Distinct participant ids in first-seen order.
    pub participants: Vec<UserId>,
}

impl ValidBooking {
    /// The reservation this booking becomes once the backend assigns `id`.
    pub fn into_reservation(self, id: impl Into<ReservationId>) -> Reservation {
        let mut reservation = Reservation::new(id, self.label, self.room_id, self.date, self.range)
            .with_participants(self.participants);
        reservation.note = self.note;
        reservation
    }
}

/// Check `request` against `policy`.
///
/// Checks run in form order: label, room, date, start, end, then the interval
/// itself, then the participant count. The first failure is reported.
pub fn validate_booking_request(
    request: &BookingRequest,
    policy: &BookingPolicy,
) -> std::result::Result<ValidBooking, Rejection> {
    let label = request.label.trim();
    if label.is_empty() {
        return Err(Rejection::MissingField(Field::Label));
    }
    let room_id = request
        .room_id
        .as_ref()
        .filter(|id| !id.as_str().trim().is_empty())
        .ok_or(Rejection::MissingField(Field::Room))?;
    let date = request.date.ok_or(Rejection::MissingField(Field::Date))?;
    let start = request.start.ok_or(Rejection::MissingField(Field::Start))?;

    let end = match request.end {
        Some(end) => end,
        None if policy.require_end => return Err(Rejection::MissingField(Field::End)),
        None => default_end_time(start).map_err(|_| Rejection::NoDefaultEnd(format_time(start)))?,
    };
    let range = TimeRange::new(start, end).map_err(|_| Rejection::InvalidRange {
        start: format_time(start),
        end: format_time(end),
    })?;

    let mut participants: Vec<UserId> = Vec::with_capacity(request.participants.len());
    for id in &request.participants {
        if !participants.contains(id) {
            participants.push(id.clone());
        }
    }
    if let Some(required) = policy.min_participants {
        if participants.len() < required {
            return Err(Rejection::InsufficientParticipants {
                required,
                actual: participants.len(),
            });
        }
    }

    let note = request
        .note
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(ValidBooking {
        label: label.to_string(),
        room_id: room_id.clone(),
        date,
        range,
        note,
        participants,
    })
}

/// Normalize the name of a room an administrator is about to create.
pub fn validate_room_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EngineError::BlankRoomName);
    }
    Ok(trimmed.to_string())
}
