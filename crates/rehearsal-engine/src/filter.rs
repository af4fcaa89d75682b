//! Client-side narrowing of the room list.

use crate::model::Room;

/// Rooms whose name contains `needle`, ignoring case. A blank needle keeps
/// every room. Catalog order is preserved.
pub fn filter_rooms<'a>(rooms: &'a [Room], needle: &str) -> Vec<&'a Room> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return rooms.iter().collect();
    }
    rooms
        .iter()
        .filter(|room| room.name.to_lowercase().contains(&needle))
        .collect()
}
