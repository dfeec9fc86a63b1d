//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the stays reservation system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the properties table.
///
/// Properties are read-only from the allocator's perspective; the owner id
/// drives the self-booking check and the nightly rate drives price
/// derivation. Rates are integer minor currency units.
pub const CREATE_PROPERTIES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS properties (
        id TEXT PRIMARY KEY NOT NULL,
        owner_id TEXT NOT NULL,
        title TEXT NOT NULL,
        location TEXT,
        price_per_night INTEGER NOT NULL,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// Dates are stored as ISO-8601 text (`YYYY-MM-DD`), which makes
/// lexicographic comparison in SQL agree with chronological order. The
/// overlap queries rely on this.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id TEXT PRIMARY KEY NOT NULL,
        property_id TEXT NOT NULL REFERENCES properties(id),
        occupant_id TEXT NOT NULL,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        status TEXT NOT NULL,
        total_price INTEGER NOT NULL,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create an index on the reservation property column.
///
/// This index speeds up the per-property conflict scan that every
/// reservation attempt performs.
pub const CREATE_PROPERTY_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_property
    ON reservations(property_id, status)";

/// SQL statement to create an index on the reservation occupant column.
///
/// This index speeds up per-occupant listings.
pub const CREATE_OCCUPANT_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_occupant
    ON reservations(occupant_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a property.
pub const INSERT_PROPERTY: &str = r"
    INSERT INTO properties
    (id, owner_id, title, location, price_per_night, created_at)
    VALUES (?, ?, ?, ?, ?, ?)
";

/// SQL statement to insert a reservation.
///
/// Used by the conditional-write path; the insert only ever runs inside a
/// transaction that has re-validated the availability invariant.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (id, property_id, occupant_id, check_in, check_out, status, total_price, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

/// SQL statement counting active reservations that overlap an interval.
///
/// Bind order: property id, requested check-in, requested check-out. The
/// predicate is the half-open intersection test: existing `[C, D)` conflicts
/// with requested `[A, B)` iff `A < D AND C < B`. Touching endpoints do not
/// match.
pub const COUNT_OVERLAPPING: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE property_id = ?1
      AND status IN ('Pending', 'Confirmed')
      AND ?2 < check_out
      AND check_in < ?3
";
