//! Integration tests for the database layer.
//!
//! These tests verify persistence across connections, schema management,
//! and the store-side overlap predicate.

mod common;

use common::{create_test_database, dates, open_existing, reservation_fixture, stored_property};
use stays::{Database, DatabaseConfig, ReservationStatus};

#[test]
fn test_data_persists_across_connections() {
    let (mut db, path) = create_test_database();
    let property = stored_property(&mut db, 100);
    let reservation = reservation_fixture(&property, (2024, 6, 1), (2024, 6, 5));
    assert!(db.try_create_reservation(&reservation).unwrap());
    drop(db);

    let db = open_existing(&path);
    let loaded_property = db.get_property(property.id()).unwrap().unwrap();
    assert_eq!(loaded_property, property);

    let loaded_reservation = db.get_reservation(reservation.id()).unwrap().unwrap();
    assert_eq!(loaded_reservation, reservation);
}

#[test]
fn test_second_connection_sees_writes() {
    let (mut db, path) = create_test_database();
    let reader = open_existing(&path);

    let property = stored_property(&mut db, 100);
    let reservation = reservation_fixture(&property, (2024, 6, 1), (2024, 6, 5));
    assert!(db.try_create_reservation(&reservation).unwrap());

    // WAL mode: the reader connection observes committed writes
    let seen = reader.get_reservation(reservation.id()).unwrap();
    assert!(seen.is_some());
}

#[test]
fn test_overlap_predicate_in_sql() {
    let (mut db, _path) = create_test_database();
    let property = stored_property(&mut db, 100);
    let reservation = reservation_fixture(&property, (2024, 6, 10), (2024, 6, 15));
    assert!(db.try_create_reservation(&reservation).unwrap());

    // (candidate interval, expected overlap)
    let cases = [
        (((2024, 6, 1), (2024, 6, 10)), false), // touches start
        (((2024, 6, 15), (2024, 6, 20)), false), // touches end
        (((2024, 6, 1), (2024, 6, 11)), true),  // crosses start
        (((2024, 6, 14), (2024, 6, 20)), true), // crosses end
        (((2024, 6, 11), (2024, 6, 13)), true), // contained
        (((2024, 6, 1), (2024, 6, 20)), true),  // containing
        (((2024, 6, 10), (2024, 6, 15)), true), // identical
        (((2024, 6, 1), (2024, 6, 5)), false),  // disjoint before
        (((2024, 6, 20), (2024, 6, 25)), false), // disjoint after
    ];

    for ((check_in, check_out), expected) in cases {
        let interval = dates(check_in, check_out);
        let overlaps = db
            .has_overlapping_reservation(property.id(), &interval)
            .unwrap();
        assert_eq!(
            overlaps, expected,
            "interval {interval} expected overlap={expected}"
        );
    }
}

#[test]
fn test_status_filter_matches_lifecycle() {
    let (mut db, _path) = create_test_database();
    let property = stored_property(&mut db, 100);

    let pending = reservation_fixture(&property, (2024, 6, 1), (2024, 6, 3));
    let confirmed = reservation_fixture(&property, (2024, 6, 5), (2024, 6, 7));
    let canceled = reservation_fixture(&property, (2024, 6, 9), (2024, 6, 11));

    for r in [&pending, &confirmed, &canceled] {
        assert!(db.try_create_reservation(r).unwrap());
    }
    db.transition_reservation(confirmed.id(), ReservationStatus::Confirmed)
        .unwrap();
    db.transition_reservation(canceled.id(), ReservationStatus::Canceled)
        .unwrap();

    let active = db
        .list_reservations_for_property(property.id(), &ReservationStatus::ACTIVE)
        .unwrap();
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|r| r.status().blocks_conflicts()));

    let all = db
        .list_reservations_for_property(
            property.id(),
            &[
                ReservationStatus::Pending,
                ReservationStatus::Confirmed,
                ReservationStatus::Canceled,
            ],
        )
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn test_listings_ordered_by_check_in() {
    let (mut db, _path) = create_test_database();
    let property = stored_property(&mut db, 100);

    let later = reservation_fixture(&property, (2024, 7, 1), (2024, 7, 5));
    let earlier = reservation_fixture(&property, (2024, 6, 1), (2024, 6, 5));
    assert!(db.try_create_reservation(&later).unwrap());
    assert!(db.try_create_reservation(&earlier).unwrap());

    let listed = db
        .list_reservations_for_property(property.id(), &ReservationStatus::ACTIVE)
        .unwrap();
    assert_eq!(listed[0].id(), earlier.id());
    assert_eq!(listed[1].id(), later.id());
}

#[test]
fn test_database_reopen_preserves_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stays.db");

    {
        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
    }

    // Reopen succeeds against the already-initialized schema
    let db = Database::open(DatabaseConfig::new(&path)).unwrap();
    let version = stays::database::get_schema_version(db.connection()).unwrap();
    assert_eq!(version, 1);
}

#[test]
fn test_total_price_round_trip() {
    let (mut db, _path) = create_test_database();
    let property = stored_property(&mut db, 100);

    // 3 nights at 100 per night
    let reservation = reservation_fixture(&property, (2024, 6, 1), (2024, 6, 4));
    assert_eq!(reservation.total_price(), 300);

    assert!(db.try_create_reservation(&reservation).unwrap());
    let loaded = db.get_reservation(reservation.id()).unwrap().unwrap();
    assert_eq!(loaded.total_price(), 300);
}
