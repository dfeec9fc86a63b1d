//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the stays library.

use std::path::PathBuf;

use chrono::NaiveDate;
use uuid::Uuid;

use stays::{Database, DatabaseConfig, Property, Reservation, StayDates};

/// Creates a temporary directory for testing.
///
/// The directory will be automatically cleaned up when the returned
/// `TempDir` is dropped.
#[allow(dead_code)]
pub fn create_temp_dir() -> std::io::Result<tempfile::TempDir> {
    tempfile::tempdir()
}

/// Creates a test database in a temporary location, returning both the
/// open handle and the path so further connections can be opened against
/// the same file.
///
/// The temporary directory is leaked for the duration of the test process.
#[allow(dead_code)]
pub fn create_test_database() -> (Database, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    std::mem::forget(dir);
    let db = Database::open(DatabaseConfig::new(&path)).unwrap();
    (db, path)
}

/// Opens an additional connection to an existing test database.
#[allow(dead_code)]
pub fn open_existing(path: &PathBuf) -> Database {
    Database::open(DatabaseConfig::new(path)).unwrap()
}

/// Creates a stay interval from (year, month, day) tuples.
#[allow(dead_code)]
pub fn dates(check_in: (i32, u32, u32), check_out: (i32, u32, u32)) -> StayDates {
    StayDates::new(
        NaiveDate::from_ymd_opt(check_in.0, check_in.1, check_in.2).unwrap(),
        NaiveDate::from_ymd_opt(check_out.0, check_out.1, check_out.2).unwrap(),
    )
    .unwrap()
}

/// Creates a test property with the given nightly rate and stores it.
#[allow(dead_code)]
pub fn stored_property(db: &mut Database, price_per_night: i64) -> Property {
    let property = Property::builder(Uuid::new_v4(), "Test property", price_per_night)
        .location(Some("Testville".to_string()))
        .build()
        .unwrap();
    db.create_property(&property).unwrap();
    property
}

/// Creates a pending reservation fixture on the given property.
#[allow(dead_code)]
pub fn reservation_fixture(
    property: &Property,
    check_in: (i32, u32, u32),
    check_out: (i32, u32, u32),
) -> Reservation {
    let interval = dates(check_in, check_out);
    let total = interval.nights() * property.price_per_night();
    Reservation::builder(property.id(), Uuid::new_v4(), interval, total)
        .build()
        .unwrap()
}
