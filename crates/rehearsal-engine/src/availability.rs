//! Per-room availability for a selected date.
//!
//! Every query is answered from the reservation snapshot the caller passes in.
//! Nothing is cached between calls: after a new booking is persisted the caller
//! fetches the day again and re-queries with the fresh snapshot.
//!
//! The check is advisory. Two clients can still race for the same slot, so the
//! backend re-validates every submission.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock::TimeRange;
use crate::model::{Reservation, Room, RoomId};

/// Whether `room_id` is free at the instant `time`.
///
/// The room is taken iff one of its reservations satisfies
/// `start <= time < end`. A room id with no reservations (including one the
/// catalog does not know) is reported free.
pub fn is_available(room_id: &RoomId, time: NaiveTime, reservations: &[Reservation]) -> bool {
    !reservations
        .iter()
        .filter(|r| r.is_for_room(room_id))
        .any(|r| r.range().contains(time))
}

/// Whether `room_id` is free for the whole of `range`.
///
/// Back-to-back bookings do not conflict: a reservation ending at 16:00 leaves
/// a range starting at 16:00 free.
pub fn is_range_available(room_id: &RoomId, range: TimeRange, reservations: &[Reservation]) -> bool {
    !reservations
        .iter()
        .filter(|r| r.is_for_room(room_id))
        .any(|r| r.range().overlaps(&range))
}

/// What the booking screen asks about: a single hour mark in the quick flow,
/// an explicit interval in the full booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityQuery {
    At(#[serde(with = "crate::clock::hhmm")] NaiveTime),
    Between(TimeRange),
}

impl AvailabilityQuery {
    pub fn is_free(&self, room_id: &RoomId, reservations: &[Reservation]) -> bool {
        match *self {
            AvailabilityQuery::At(time) => is_available(room_id, time, reservations),
            AvailabilityQuery::Between(range) => is_range_available(room_id, range, reservations),
        }
    }
}

/// Reservations known for a day. `Pending` means the fetch has not completed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReservationSet {
    #[default]
    Pending,
    Loaded(Vec<Reservation>),
}

/// The reservation state of one calendar date as seen by the caller.
///
/// A pending snapshot answers every query as free, so the room board can render
/// before the reservation fetch lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySnapshot {
    date: NaiveDate,
    reservations: ReservationSet,
}

impl DaySnapshot {
    pub fn pending(date: NaiveDate) -> Self {
        Self {
            date,
            reservations: ReservationSet::Pending,
        }
    }

    /// A loaded snapshot. Reservations dated on another day are dropped.
    pub fn loaded(date: NaiveDate, reservations: Vec<Reservation>) -> Self {
        let reservations = reservations.into_iter().filter(|r| r.date == date).collect();
        Self {
            date,
            reservations: ReservationSet::Loaded(reservations),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.reservations, ReservationSet::Pending)
    }

    /// The day's reservations; empty while pending.
    pub fn reservations(&self) -> &[Reservation] {
        match &self.reservations {
            ReservationSet::Pending => &[],
            ReservationSet::Loaded(list) => list,
        }
    }

    /// A new loaded snapshot that also contains `reservation`. The receiver is
    /// left untouched; a reservation for another date is ignored.
    pub fn with_reservation(&self, reservation: Reservation) -> Self {
        let mut list = self.reservations().to_vec();
        list.push(reservation);
        Self::loaded(self.date, list)
    }
}

/// The free/occupied signal for one room on the booking board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAvailability {
    pub room: Room,
    pub free: bool,
}

/// Answer `query` for every room in catalog order.
pub fn room_board(rooms: &[Room], query: &AvailabilityQuery, snapshot: &DaySnapshot) -> Vec<RoomAvailability> {
    let reservations = snapshot.reservations();
    rooms
        .iter()
        .map(|room| RoomAvailability {
            room: room.clone(),
            free: query.is_free(&room.id, reservations),
        })
        .collect()
}
