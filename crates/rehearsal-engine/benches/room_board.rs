use chrono::{NaiveDate, NaiveTime};
use criterion::{criterion_group, criterion_main, Criterion};
use rehearsal_engine::{room_board, AvailabilityQuery, DaySnapshot, Reservation, Room, TimeRange};
use std::hint::black_box;

fn busy_day(rooms: usize) -> (Vec<Room>, DaySnapshot) {
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let rooms: Vec<Room> = (0..rooms)
        .map(|i| Room::new(format!("room-{i}"), format!("Sala {i}")))
        .collect();

    let mut reservations = Vec::new();
    for room in &rooms {
        for hour in (8..22).step_by(2) {
            let range = TimeRange::new(
                NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
            )
            .unwrap();
            reservations.push(Reservation::new(
                format!("{}-{hour}", room.id),
                "Ensaio",
                room.id.clone(),
                date,
                range,
            ));
        }
    }

    (rooms, DaySnapshot::loaded(date, reservations))
}

fn bench_room_board(c: &mut Criterion) {
    let (rooms, snapshot) = busy_day(12);
    let at = AvailabilityQuery::At(NaiveTime::from_hms_opt(14, 0, 0).unwrap());
    let between = AvailabilityQuery::Between(TimeRange::parse("13:30", "15:30").unwrap());

    c.bench_function("room_board/point_12_rooms", |b| {
        b.iter(|| room_board(black_box(&rooms), black_box(&at), black_box(&snapshot)))
    });
    c.bench_function("room_board/range_12_rooms", |b| {
        b.iter(|| room_board(black_box(&rooms), black_box(&between), black_box(&snapshot)))
    });
}

criterion_group!(benches, bench_room_board);
criterion_main!(benches);
