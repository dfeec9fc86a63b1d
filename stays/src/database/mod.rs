//! Database layer for persistent storage of properties and reservations.
//!
//! This module provides a SQLite-based storage layer for the reservation
//! system, including connection management, schema versioning, plain
//! queries, and the transactional writes that carry the system's atomicity
//! guarantees.
//!
//! # Examples
//!
//! ```no_run
//! use stays::database::{Database, DatabaseConfig};
//! use stays::{Property, ReservationStatus};
//! use uuid::Uuid;
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/stays.db");
//! let mut db = Database::open(config).unwrap();
//!
//! // Create a property
//! let property = Property::builder(Uuid::new_v4(), "Seaside cottage", 100)
//!     .build()
//!     .unwrap();
//! db.create_property(&property).unwrap();
//!
//! // List its active reservations
//! let active = db
//!     .list_reservations_for_property(property.id(), &ReservationStatus::ACTIVE)
//!     .unwrap();
//! assert!(active.is_empty());
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
#[cfg(test)]
pub(crate) mod test_util;
mod transaction;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
