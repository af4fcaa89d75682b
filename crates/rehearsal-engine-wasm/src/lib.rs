//! WASM bindings for rehearsal-engine.
//!
//! Exposes room availability, the room board, booking validation and free
//! windows to the booking screen via `wasm-bindgen`. Complex types cross the
//! boundary as JSON strings in the engine's own shape (`room_id`, `start`,
//! `end` as `HH:MM`), not the backend's wire format.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p rehearsal-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/rehearsal_engine_wasm.wasm
//! ```

use chrono::NaiveTime;
use rehearsal_engine::{
    AvailabilityQuery, BookingPolicy, BookingRequest, DaySnapshot, Reservation, Room, RoomId,
    TimeRange,
};
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Plain-Rust layer. Errors are strings so it runs on native targets too.
// ---------------------------------------------------------------------------

type Outcome<T> = Result<T, String>;

fn parse_json<T: DeserializeOwned>(what: &str, json: &str) -> Outcome<T> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Outcome<String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn time(s: &str) -> Outcome<NaiveTime> {
    rehearsal_engine::parse_time(s).map_err(|e| e.to_string())
}

fn range(start: &str, end: &str) -> Outcome<TimeRange> {
    TimeRange::parse(start, end).map_err(|e| e.to_string())
}

fn reservations(json: &str) -> Outcome<Vec<Reservation>> {
    parse_json("reservations", json)
}

fn is_available_impl(room_id: &str, at: &str, reservations_json: &str) -> Outcome<bool> {
    Ok(rehearsal_engine::is_available(
        &RoomId::new(room_id),
        time(at)?,
        &reservations(reservations_json)?,
    ))
}

fn is_range_available_impl(room_id: &str, start: &str, end: &str, reservations_json: &str) -> Outcome<bool> {
    Ok(rehearsal_engine::is_range_available(
        &RoomId::new(room_id),
        range(start, end)?,
        &reservations(reservations_json)?,
    ))
}

fn room_board_impl(
    rooms_json: &str,
    query_json: &str,
    date: &str,
    reservations_json: Option<&str>,
) -> Outcome<String> {
    let rooms: Vec<Room> = parse_json("rooms", rooms_json)?;
    let query: AvailabilityQuery = parse_json("query", query_json)?;
    let date = rehearsal_engine::parse_date(date).map_err(|e| e.to_string())?;
    let snapshot = match reservations_json {
        Some(json) => DaySnapshot::loaded(date, reservations(json)?),
        None => DaySnapshot::pending(date),
    };
    to_json(&rehearsal_engine::room_board(&rooms, &query, &snapshot))
}

fn find_conflicts_impl(room_id: &str, start: &str, end: &str, reservations_json: &str) -> Outcome<String> {
    let conflicts = rehearsal_engine::find_conflicts(
        &RoomId::new(room_id),
        range(start, end)?,
        &reservations(reservations_json)?,
    );
    to_json(&conflicts)
}

fn free_windows_impl(room_id: &str, reservations_json: &str, open: &str, close: &str) -> Outcome<String> {
    let windows = rehearsal_engine::free_windows(
        &RoomId::new(room_id),
        &reservations(reservations_json)?,
        range(open, close)?,
    );
    to_json(&windows)
}

fn default_end_time_impl(start: &str) -> Outcome<String> {
    let end = rehearsal_engine::default_end_time(time(start)?).map_err(|e| e.to_string())?;
    Ok(rehearsal_engine::format_time(end))
}

fn validate_booking_request_impl(request_json: &str, quick: bool) -> Outcome<String> {
    let request: BookingRequest = parse_json("booking request", request_json)?;
    let policy = if quick {
        BookingPolicy::quick()
    } else {
        BookingPolicy::ensemble()
    };
    let booking = rehearsal_engine::validate_booking_request(&request, &policy).map_err(|e| e.to_string())?;
    to_json(&booking)
}

fn filter_rooms_impl(rooms_json: &str, needle: &str) -> Outcome<String> {
    let rooms: Vec<Room> = parse_json("rooms", rooms_json)?;
    to_json(&rehearsal_engine::filter_rooms(&rooms, needle))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

fn js(e: String) -> JsValue {
    JsValue::from_str(&e)
}

/// Whether a room is free at `at` (`HH:MM`).
///
/// `reservations_json` is a JSON array of reservations for the selected date.
#[wasm_bindgen(js_name = "isAvailable")]
pub fn is_available(room_id: &str, at: &str, reservations_json: &str) -> Result<bool, JsValue> {
    is_available_impl(room_id, at, reservations_json).map_err(js)
}

/// Whether a room is free for the whole of `[start, end)`.
#[wasm_bindgen(js_name = "isRangeAvailable")]
pub fn is_range_available(
    room_id: &str,
    start: &str,
    end: &str,
    reservations_json: &str,
) -> Result<bool, JsValue> {
    is_range_available_impl(room_id, start, end, reservations_json).map_err(js)
}

/// Availability of every room for one query.
///
/// `query_json` is `{"at": "HH:MM"}` or `{"between": {"start": .., "end": ..}}`.
/// Pass no reservations while the day is still loading; every room then
/// shows free. Returns a JSON array of `{room, free}` in catalog order.
#[wasm_bindgen(js_name = "roomBoard")]
pub fn room_board(
    rooms_json: &str,
    query_json: &str,
    date: &str,
    reservations_json: Option<String>,
) -> Result<String, JsValue> {
    room_board_impl(rooms_json, query_json, date, reservations_json.as_deref()).map_err(js)
}

/// Reservations of a room overlapping `[start, end)`, with overlap minutes.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(
    room_id: &str,
    start: &str,
    end: &str,
    reservations_json: &str,
) -> Result<String, JsValue> {
    find_conflicts_impl(room_id, start, end, reservations_json).map_err(js)
}

/// Free windows of a room between opening and closing time.
///
/// Returns a JSON array of `{start, end, duration_minutes}` objects.
#[wasm_bindgen(js_name = "freeWindows")]
pub fn free_windows(
    room_id: &str,
    reservations_json: &str,
    open: &str,
    close: &str,
) -> Result<String, JsValue> {
    free_windows_impl(room_id, reservations_json, open, close).map_err(js)
}

/// End of the one-hour slot starting at `start`: the next full hour.
///
/// Throws for starts in the last hour of the day.
#[wasm_bindgen(js_name = "defaultEndTime")]
pub fn default_end_time(start: &str) -> Result<String, JsValue> {
    default_end_time_impl(start).map_err(js)
}

/// Validate a booking request before submission.
///
/// With `quick` the end time may be omitted and no participant minimum
/// applies. Returns the normalized booking as JSON, or throws the rejection
/// message.
#[wasm_bindgen(js_name = "validateBookingRequest")]
pub fn validate_booking_request(request_json: &str, quick: bool) -> Result<String, JsValue> {
    validate_booking_request_impl(request_json, quick).map_err(js)
}

/// Rooms whose name contains `needle`, case-insensitively.
#[wasm_bindgen(js_name = "filterRooms")]
pub fn filter_rooms(rooms_json: &str, needle: &str) -> Result<String, JsValue> {
    filter_rooms_impl(rooms_json, needle).map_err(js)
}
