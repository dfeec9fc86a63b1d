//! Concurrent reservation tests.
//!
//! These tests verify the one correctness-critical property of the system:
//! under concurrent reservation attempts on the same property, overlapping
//! intervals can never both commit. Each thread opens its own connection to
//! the shared database file, so the serialization comes entirely from the
//! store's IMMEDIATE transactions (plus WAL mode and the busy timeout), not
//! from any in-process lock.

mod common;

use std::thread;

use common::{create_test_database, dates, stored_property};
use uuid::Uuid;

use stays::{
    Database, DatabaseConfig, Error, PlanExecutor, ReservationStatus, ReserveOptions, ReservePlan,
    StayDates,
};

/// Runs a full plan-execute reservation attempt on its own connection.
fn attempt(path: &std::path::Path, property_id: Uuid, interval: StayDates) -> Result<(), Error> {
    let mut db = Database::open(DatabaseConfig::new(path))?;
    let options = ReserveOptions::new(property_id, Uuid::new_v4(), interval);
    let plan = ReservePlan::new(options).build_plan(&db)?;
    PlanExecutor::new(&mut db).execute(&plan)?;
    Ok(())
}

#[test]
fn test_identical_interval_race_has_exactly_one_winner() {
    let (mut db, path) = create_test_database();
    let property = stored_property(&mut db, 100);
    let property_id = property.id();
    drop(db);

    let interval = dates((2024, 6, 1), (2024, 6, 5));

    // Ten simultaneous attempts for the identical interval
    let handles: Vec<_> = (0..10)
        .map(|_| {
            let path = path.clone();
            thread::spawn(move || attempt(&path, property_id, interval))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one attempt must win the race");

    // Every loser saw a conflict, never partial state or a panic
    for result in &results {
        if let Err(e) = result {
            assert!(
                matches!(e, Error::DatesUnavailable { .. }),
                "losers must receive the conflict error, got: {e}"
            );
        }
    }

    // No double-booking persisted
    let db = Database::open(DatabaseConfig::new(&path)).unwrap();
    let active = db
        .list_reservations_for_property(property_id, &ReservationStatus::ACTIVE)
        .unwrap();
    assert_eq!(active.len(), 1);
}

#[test]
fn test_disjoint_intervals_all_succeed_concurrently() {
    let (mut db, path) = create_test_database();
    let property = stored_property(&mut db, 100);
    let property_id = property.id();
    drop(db);

    // Ten non-overlapping month-long slots
    let handles: Vec<_> = (0..10u32)
        .map(|i| {
            let path = path.clone();
            let interval = dates((2024, i + 1, 1), (2024, i + 1, 20));
            thread::spawn(move || attempt(&path, property_id, interval))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 10, "disjoint intervals must never conflict");

    let db = Database::open(DatabaseConfig::new(&path)).unwrap();
    let active = db
        .list_reservations_for_property(property_id, &ReservationStatus::ACTIVE)
        .unwrap();
    assert_eq!(active.len(), 10);
}

#[test]
fn test_overlapping_pair_race_never_double_books() {
    // Two threads racing on overlapping (but not identical) intervals;
    // repeated to give interleavings a chance to vary.
    for round in 0..5 {
        let (mut db, path) = create_test_database();
        let property = stored_property(&mut db, 100);
        let property_id = property.id();
        drop(db);

        let a = dates((2024, 6, 1), (2024, 6, 10));
        let b = dates((2024, 6, 5), (2024, 6, 15));

        let handle_a = {
            let path = path.clone();
            thread::spawn(move || attempt(&path, property_id, a))
        };
        let handle_b = {
            let path = path.clone();
            thread::spawn(move || attempt(&path, property_id, b))
        };

        let result_a = handle_a.join().unwrap();
        let result_b = handle_b.join().unwrap();

        let successes = [&result_a, &result_b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "round {round}: exactly one side must win");

        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        let active = db
            .list_reservations_for_property(property_id, &ReservationStatus::ACTIVE)
            .unwrap();
        assert_eq!(active.len(), 1, "round {round}: no double-booking persists");
    }
}
