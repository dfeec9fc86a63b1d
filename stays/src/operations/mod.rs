//! Reservation operations using the plan-execute pattern.
//!
//! This module provides a plan-execute pattern for reservation operations,
//! separating planning from execution to enable dry-run mode, better testing,
//! and clear error messages.
//!
//! # Architecture
//!
//! Operations are split into two phases:
//! 1. **Planning**: Analyzes the request, validates constraints, builds a plan
//! 2. **Execution**: Takes the plan and performs actual database operations
//!
//! Planning never mutates; execution re-validates each action's decisive
//! condition inside the store's transaction. Under concurrent attempts on
//! the same property the transaction order decides the winner, and the loser
//! receives a conflict error with nothing written.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use uuid::Uuid;
//! use stays::{
//!     Database, DatabaseConfig, PlanExecutor, ReserveOptions, ReservePlan, StayDates,
//! };
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/stays.db")).unwrap();
//! let dates = StayDates::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
//! )
//! .unwrap();
//!
//! // Generate plan
//! let options = ReserveOptions::new(Uuid::new_v4(), Uuid::new_v4(), dates);
//! let plan = ReservePlan::new(options).build_plan(&db).unwrap();
//!
//! // Execute plan
//! let mut executor = PlanExecutor::new(&mut db);
//! let result = executor.execute(&plan).unwrap();
//! ```

pub mod executor;
pub mod plan;
pub mod reserve;
pub mod transition;

// Re-export key types at module root
pub use executor::{ExecutionResult, PlanExecutor};
pub use plan::{OperationPlan, PlanAction};
pub use reserve::{ReserveOptions, ReservePlan};
pub use transition::{TransitionOptions, TransitionPlan};
