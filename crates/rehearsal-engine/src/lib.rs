//! # rehearsal-engine
//!
//! Rehearsal-room availability and booking validation for the Encenna console.
//!
//! Given the rooms of the school and the reservations already made for a date,
//! the engine tells the booking screen which rooms are free at a time or over
//! an interval, and checks a booking request locally before it is submitted.
//! All functions are synchronous and pure: they read the snapshot they are
//! handed and keep no state between calls.
//!
//! ## Modules
//!
//! - [`clock`]: `HH:MM` wall-clock times, half-open ranges, the default one-hour end
//! - [`model`]: Rooms, reservations, participants, roles
//! - [`availability`]: Point and range availability, day snapshots, the room board
//! - [`conflict`]: Reservations blocking a requested range
//! - [`freebusy`]: Free windows of a room over its opening hours
//! - [`validation`]: Booking request rules (required fields, participant minimum)
//! - [`roster`]: Participant list without duplicates
//! - [`filter`]: Room name search
//! - [`error`]: Error types

pub mod availability;
pub mod clock;
pub mod conflict;
pub mod error;
pub mod filter;
pub mod freebusy;
pub mod model;
pub mod roster;
pub mod validation;

pub use availability::{
    is_available, is_range_available, room_board, AvailabilityQuery, DaySnapshot, RoomAvailability,
};
pub use clock::{default_end_time, format_time, parse_date, parse_time, TimeRange};
pub use conflict::{find_conflicts, Conflict};
pub use error::EngineError;
pub use filter::filter_rooms;
pub use freebusy::{first_free_window, free_windows, FreeWindow};
pub use model::{Participant, Reservation, ReservationId, Role, Room, RoomId, UserId};
pub use roster::ParticipantRoster;
pub use validation::{
    validate_booking_request, validate_room_name, BookingPolicy, BookingRequest, Field, Rejection,
    ValidBooking, MIN_ENSEMBLE_PARTICIPANTS,
};
