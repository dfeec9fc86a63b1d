#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # stays
//!
//! A library for managing property stay reservations.
//!
//! This library provides the core types and operations for deciding whether a
//! requested stay interval may be reserved on a property, considering the
//! existing reservations in non-terminal states, and for driving a
//! reservation through its lifecycle.
//!
//! ## Core Types
//!
//! - [`StayDates`]: a validated half-open `[check_in, check_out)` interval
//! - [`Reservation`] and [`ReservationStatus`]: reservation tracking and its
//!   state machine
//! - [`Property`]: the reservable resource with its nightly rate
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use stays::StayDates;
//!
//! let dates = StayDates::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(dates.nights(), 4);
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod operations;
pub mod property;
pub mod reservation;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    ExecutionResult, OperationPlan, PlanAction, PlanExecutor, ReserveOptions, ReservePlan,
    TransitionOptions, TransitionPlan,
};
pub use property::Property;
pub use reservation::{Reservation, ReservationStatus, StayDates};
