//! List the reservations that block a requested slot.
//!
//! Adjacent reservations (one ends exactly when the request starts) are NOT
//! conflicts.

use serde::Serialize;

use crate::clock::TimeRange;
use crate::model::{Reservation, RoomId};

/// An existing reservation overlapping the requested range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub reservation: Reservation,
    pub overlap_minutes: i64,
}

/// Find every reservation of `room_id` that overlaps `requested`.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
/// Results keep the order of `reservations`.
pub fn find_conflicts(room_id: &RoomId, requested: TimeRange, reservations: &[Reservation]) -> Vec<Conflict> {
    reservations
        .iter()
        .filter(|r| r.is_for_room(room_id))
        .filter(|r| r.range().overlaps(&requested))
        .map(|r| {
            let overlap_start = r.start().max(requested.start);
            let overlap_end = r.end().min(requested.end);
            Conflict {
                reservation: r.clone(),
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            }
        })
        .collect()
}
