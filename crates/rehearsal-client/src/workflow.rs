//! The booking screen's workflow: load a day, show the room board, book a slot.
//!
//! Room and reservation fetches run concurrently. After a successful booking
//! the day is fetched again and the caller gets the fresh view; nothing is
//! patched locally.

use chrono::NaiveDate;
use rehearsal_engine::{
    find_conflicts, room_board, validate_booking_request, validate_room_name, AvailabilityQuery,
    BookingPolicy, BookingRequest, DaySnapshot, Participant, Room, RoomAvailability,
};

use crate::config::Session;
use crate::error::{ClientError, Result};
use crate::ports::{BookingQuery, ReservationSubmitter, RoomCatalog, UserDirectory};

/// Rooms plus the reservation snapshot of one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub rooms: Vec<Room>,
    pub snapshot: DaySnapshot,
}

impl DayView {
    pub fn date(&self) -> NaiveDate {
        self.snapshot.date()
    }

    pub fn board(&self, query: &AvailabilityQuery) -> Vec<RoomAvailability> {
        room_board(&self.rooms, query, &self.snapshot)
    }
}

pub struct BookingWorkflow<C> {
    backend: C,
    session: Session,
}

impl<C> BookingWorkflow<C>
where
    C: RoomCatalog + BookingQuery + ReservationSubmitter,
{
    pub fn new(backend: C, session: Session) -> Self {
        Self { backend, session }
    }

    pub fn backend(&self) -> &C {
        &self.backend
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fetch rooms and the day's reservations.
    ///
    /// A failed reservation fetch leaves the snapshot pending, so every room
    /// shows as free until the caller reloads. A failed room fetch, or an
    /// expired session, is an error.
    pub async fn load_day(&self, date: NaiveDate) -> Result<DayView> {
        let (rooms, reservations) = tokio::join!(
            self.backend.list_rooms(&self.session),
            self.backend.list_reservations(&self.session, date),
        );
        let rooms = rooms?;

        let snapshot = match reservations {
            Ok(list) => DaySnapshot::loaded(date, list),
            Err(ClientError::Unauthorized) => return Err(ClientError::Unauthorized),
            Err(e) => {
                tracing::warn!("reservations for {date} unavailable, showing all rooms free: {e}");
                DaySnapshot::pending(date)
            }
        };
        tracing::debug!(
            "loaded {date}: {} rooms, {} reservations",
            rooms.len(),
            snapshot.reservations().len()
        );
        Ok(DayView { rooms, snapshot })
    }

    /// Validate locally, refuse a slot the snapshot shows as taken, submit,
    /// then return the re-fetched day of the booking.
    ///
    /// When the request targets another date than `view`, that date's
    /// reservations are fetched for the conflict check.
    pub async fn book(&self, view: &DayView, request: &BookingRequest, policy: &BookingPolicy) -> Result<DayView> {
        let booking = validate_booking_request(request, policy)?;

        let other_day;
        let snapshot = if booking.date == view.date() {
            &view.snapshot
        } else {
            let reservations = self.backend.list_reservations(&self.session, booking.date).await?;
            other_day = DaySnapshot::loaded(booking.date, reservations);
            &other_day
        };

        if snapshot.is_pending() {
            tracing::debug!("no reservation snapshot for {}, leaving the conflict check to the backend", booking.date);
        }
        let conflicts = find_conflicts(&booking.room_id, booking.range, snapshot.reservations());
        if !conflicts.is_empty() {
            return Err(ClientError::SlotTaken {
                room: booking.room_id,
                conflicts,
            });
        }

        self.backend.create_reservation(&self.session, &booking).await?;
        tracing::info!(
            "booked room {} on {} {}-{} for '{}'",
            booking.room_id,
            booking.date,
            rehearsal_engine::format_time(booking.range.start),
            rehearsal_engine::format_time(booking.range.end),
            booking.label
        );

        self.load_day(booking.date).await
    }

    /// Create a room (administrators only) and return the refreshed catalog.
    pub async fn add_room(&self, name: &str) -> Result<Vec<Room>> {
        if !self.session.role().is_some_and(|role| role.can_manage_rooms()) {
            return Err(ClientError::Forbidden("only administrators can create rooms".to_string()));
        }
        let name = validate_room_name(name)?;
        self.backend.create_room(&self.session, &name).await?;
        tracing::info!("created room '{name}'");
        self.backend.list_rooms(&self.session).await
    }
}

impl<C> BookingWorkflow<C>
where
    C: UserDirectory,
{
    /// Candidates for the participant picker. A blank query returns nothing.
    pub async fn search_participants(&self, name: &str) -> Result<Vec<Participant>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Vec::new());
        }
        self.backend.search_users(&self.session, name).await
    }
}
