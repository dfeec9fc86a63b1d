//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple database test
//! modules.

use chrono::NaiveDate;
use tempfile::tempdir;
use uuid::Uuid;

use crate::database::{Database, DatabaseConfig};
use crate::{Property, Reservation, StayDates};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Creates a stay interval from (year, month, day) tuples.
///
/// # Panics
///
/// Panics on an invalid date or interval. This is acceptable in test code.
#[must_use]
pub fn sample_dates(check_in: (i32, u32, u32), check_out: (i32, u32, u32)) -> StayDates {
    StayDates::new(
        NaiveDate::from_ymd_opt(check_in.0, check_in.1, check_in.2).unwrap(),
        NaiveDate::from_ymd_opt(check_out.0, check_out.1, check_out.2).unwrap(),
    )
    .unwrap()
}

/// Creates a test property with the given nightly rate.
///
/// # Panics
///
/// Panics if the property cannot be built. This is acceptable in test code.
#[must_use]
pub fn sample_property(price_per_night: i64) -> Property {
    Property::builder(Uuid::new_v4(), "Test property", price_per_night)
        .build()
        .unwrap()
}

/// Creates a pending test reservation on the given property, pricing the
/// stay at the property's nightly rate.
///
/// # Panics
///
/// Panics if the reservation cannot be built. This is acceptable in test
/// code.
#[must_use]
pub fn sample_reservation(
    property: &Property,
    check_in: (i32, u32, u32),
    check_out: (i32, u32, u32),
) -> Reservation {
    let dates = sample_dates(check_in, check_out);
    let total = dates.nights() * property.price_per_night();
    Reservation::builder(property.id(), Uuid::new_v4(), dates, total)
        .build()
        .unwrap()
}
