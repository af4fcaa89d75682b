//! Rooms, reservations, participants and console roles.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock::{hhmm, TimeRange};
use crate::error::EngineError;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

opaque_id!(
    /// Backend identifier of a bookable room.
    RoomId
);
opaque_id!(
    /// Backend identifier of a reservation.
    ReservationId
);
opaque_id!(
    /// Backend identifier of a console user (student, teacher or administrator).
    UserId
);

/// A bookable rehearsal room. Created and deleted by administrators through
/// the room catalog; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
}

impl Room {
    pub fn new(id: impl Into<RoomId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A user who can be listed as a rehearsal participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: UserId,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An existing booking of one room on one date.
///
/// `start < end` always holds: the times are only set from a checked
/// [`TimeRange`], and JSON input goes through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReservationRecord")]
pub struct Reservation {
    pub id: ReservationId,
    /// The piece or reason the room is booked for.
    pub label: String,
    pub room_id: RoomId,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    start: NaiveTime,
    #[serde(with = "hhmm")]
    end: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<UserId>,
}

/// Unchecked JSON shape of a [`Reservation`].
#[derive(Deserialize)]
struct ReservationRecord {
    id: ReservationId,
    label: String,
    room_id: RoomId,
    date: NaiveDate,
    #[serde(with = "hhmm")]
    start: NaiveTime,
    #[serde(with = "hhmm")]
    end: NaiveTime,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    participants: Vec<UserId>,
}

impl TryFrom<ReservationRecord> for Reservation {
    type Error = EngineError;

    fn try_from(record: ReservationRecord) -> Result<Self, EngineError> {
        let range = TimeRange::new(record.start, record.end)?;
        let mut reservation = Reservation::new(record.id, record.label, record.room_id, record.date, range)
            .with_participants(record.participants);
        reservation.note = record.note;
        Ok(reservation)
    }
}

impl Reservation {
    pub fn new(
        id: impl Into<ReservationId>,
        label: impl Into<String>,
        room_id: impl Into<RoomId>,
        date: NaiveDate,
        range: TimeRange,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            room_id: room_id.into(),
            date,
            start: range.start,
            end: range.end,
            note: None,
            participants: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_participants(mut self, participants: Vec<UserId>) -> Self {
        self.participants = participants;
        self
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }

    pub fn is_for_room(&self, room_id: &RoomId) -> bool {
        self.room_id == *room_id
    }
}

/// Console user roles, named on the wire the way the backend stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Administrador")]
    Administrator,
    #[serde(rename = "Professor")]
    Teacher,
    #[serde(rename = "Aluno")]
    Student,
}

impl Role {
    /// Only administrators see the room management panel.
    pub fn can_manage_rooms(self) -> bool {
        matches!(self, Role::Administrator)
    }
}
