//! Free windows of a room over its opening hours.
//!
//! A room's day is the opening range minus the time its reservations hold it.
//! Back-to-back reservations count as one occupied span, so a window always
//! ends where the next rehearsal starts.

use chrono::NaiveTime;
use serde::Serialize;

use crate::clock::{hhmm, TimeRange};
use crate::model::{Reservation, RoomId};

/// A gap in a room's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeWindow {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub duration_minutes: i64,
}

impl FreeWindow {
    fn between(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// Spans of the day during which `room_id` is held, cut to the opening hours.
/// Reservations that touch or overlap collapse into one span.
fn occupied_spans(
    room_id: &RoomId,
    reservations: &[Reservation],
    opening: TimeRange,
) -> Vec<(NaiveTime, NaiveTime)> {
    let mut held: Vec<(NaiveTime, NaiveTime)> = reservations
        .iter()
        .filter(|r| r.is_for_room(room_id) && r.range().overlaps(&opening))
        .map(|r| (r.start().max(opening.start), r.end().min(opening.end)))
        .collect();

    held.sort_unstable();

    let mut spans: Vec<(NaiveTime, NaiveTime)> = Vec::with_capacity(held.len());
    for (start, end) in held {
        match spans.last_mut() {
            Some(span) if start <= span.1 => span.1 = span.1.max(end),
            _ => spans.push((start, end)),
        }
    }
    spans
}

/// Free windows of `room_id` within `opening`, sorted by start time.
pub fn free_windows(room_id: &RoomId, reservations: &[Reservation], opening: TimeRange) -> Vec<FreeWindow> {
    let occupied = occupied_spans(room_id, reservations, opening);

    let mut windows = Vec::new();
    let mut free_from = opening.start;
    for (held_from, held_until) in occupied {
        if free_from < held_from {
            windows.push(FreeWindow::between(free_from, held_from));
        }
        free_from = free_from.max(held_until);
    }
    // Time left after the last rehearsal of the day.
    if free_from < opening.end {
        windows.push(FreeWindow::between(free_from, opening.end));
    }
    windows
}

/// Earliest window in which the room stays free for `min_duration_minutes`.
pub fn first_free_window(
    room_id: &RoomId,
    reservations: &[Reservation],
    opening: TimeRange,
    min_duration_minutes: i64,
) -> Option<FreeWindow> {
    free_windows(room_id, reservations, opening)
        .into_iter()
        .find(|w| w.duration_minutes >= min_duration_minutes)
}
