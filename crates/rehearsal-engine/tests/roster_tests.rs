//! Tests for the participant roster and room search.

use rehearsal_engine::{filter_rooms, BookingPolicy, Participant, ParticipantRoster, Room, UserId};

fn person(id: &str, name: &str) -> Participant {
    Participant::new(id, name)
}

#[test]
fn adding_same_user_twice_keeps_one_entry() {
    let mut roster = ParticipantRoster::new();
    assert!(roster.add(person("u1", "Ana")));
    assert!(!roster.add(person("u1", "Ana")));
    assert_eq!(roster.len(), 1);
}

#[test]
fn remove_by_id() {
    let mut roster: ParticipantRoster = vec![person("u1", "Ana"), person("u2", "Bruno")]
        .into_iter()
        .collect();

    let removed = roster.remove(&UserId::new("u1")).unwrap();
    assert_eq!(removed.name, "Ana");
    assert!(!roster.contains(&UserId::new("u1")));
    assert!(roster.remove(&UserId::new("u1")).is_none());
    assert_eq!(roster.ids(), vec![UserId::new("u2")]);
}

#[test]
fn ids_keep_pick_order() {
    let roster: ParticipantRoster = ["u3", "u1", "u2", "u1"]
        .iter()
        .map(|id| person(id, "x"))
        .collect();
    assert_eq!(
        roster.ids(),
        vec![UserId::new("u3"), UserId::new("u1"), UserId::new("u2")]
    );
}

#[test]
fn shortfall_counts_missing_participants() {
    let mut roster = ParticipantRoster::new();
    let ensemble = BookingPolicy::ensemble();
    assert_eq!(roster.shortfall(&ensemble), 5);

    for i in 0..3 {
        roster.add(person(&format!("u{i}"), "x"));
    }
    assert_eq!(roster.shortfall(&ensemble), 2);

    for i in 3..7 {
        roster.add(person(&format!("u{i}"), "x"));
    }
    assert_eq!(roster.shortfall(&ensemble), 0);
    assert_eq!(roster.shortfall(&BookingPolicy::quick()), 0);
}

#[test]
fn room_search_is_case_insensitive() {
    let rooms = vec![
        Room::new("1", "Palco Principal"),
        Room::new("2", "Sala de Dança"),
        Room::new("3", "Estúdio de Música"),
    ];

    let hits = filter_rooms(&rooms, "SALA");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Sala de Dança");

    let hits = filter_rooms(&rooms, "de");
    assert_eq!(hits.len(), 2);

    assert_eq!(filter_rooms(&rooms, "  ").len(), 3);
    assert!(filter_rooms(&rooms, "auditório").is_empty());
}
