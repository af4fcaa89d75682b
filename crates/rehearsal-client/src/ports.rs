//! The backend services the booking workflow depends on.

use async_trait::async_trait;
use chrono::NaiveDate;
use rehearsal_engine::{Participant, Reservation, Room, ValidBooking};

use crate::config::Session;
use crate::error::Result;

/// Bookable rooms.
#[async_trait]
pub trait RoomCatalog: Send + Sync {
    async fn list_rooms(&self, session: &Session) -> Result<Vec<Room>>;

    /// Create a room. `name` has already been validated.
    async fn create_room(&self, session: &Session, name: &str) -> Result<()>;
}

/// Existing reservations, one date at a time.
#[async_trait]
pub trait BookingQuery: Send + Sync {
    async fn list_reservations(&self, session: &Session, date: NaiveDate) -> Result<Vec<Reservation>>;
}

/// Persists accepted bookings. The backend is the authority on conflicts and
/// must refuse a slot taken by a concurrent submission.
#[async_trait]
pub trait ReservationSubmitter: Send + Sync {
    async fn create_reservation(&self, session: &Session, booking: &ValidBooking) -> Result<()>;
}

/// User lookup for the participant picker.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn search_users(&self, session: &Session, name: &str) -> Result<Vec<Participant>>;
}
