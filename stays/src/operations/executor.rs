//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans
//! and applies them to the database.

use crate::database::Database;
use crate::error::{Error, Result};
use crate::Reservation;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what actions were taken.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The reservation that was created or transitioned (if applicable).
    pub reservation: Option<Reservation>,
}

impl ExecutionResult {
    /// Creates a successful execution result.
    fn success(plan: &OperationPlan, reservation: Option<Reservation>) -> Self {
        Self {
            success: true,
            dry_run: false,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation,
        }
    }

    /// Creates a dry-run execution result.
    fn dry_run(plan: &OperationPlan) -> Self {
        Self {
            success: true,
            dry_run: true,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation: Self::planned_reservation(plan),
        }
    }

    /// Extracts the reservation a plan would create, without touching the
    /// database.
    fn planned_reservation(plan: &OperationPlan) -> Option<Reservation> {
        plan.actions.iter().find_map(|action| match action {
            PlanAction::CreateReservation(r) => Some(r.clone()),
            PlanAction::TransitionStatus { .. } => None,
        })
    }
}

/// Executes operation plans against the database.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (validating without changes). Execution re-validates the decisive
/// condition of every action inside the store's transaction, so a plan that
/// raced with a concurrent writer fails cleanly rather than committing a
/// stale decision.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use uuid::Uuid;
/// use stays::{
///     Database, DatabaseConfig, PlanExecutor, ReserveOptions, ReservePlan, StayDates,
/// };
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/stays.db")).unwrap();
/// let dates = StayDates::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
/// )
/// .unwrap();
/// let options = ReserveOptions::new(Uuid::new_v4(), Uuid::new_v4(), dates);
/// let plan = ReservePlan::new(options).build_plan(&db).unwrap();
///
/// let mut executor = PlanExecutor::new(&mut db);
/// let result = executor.execute(&plan).unwrap();
/// assert!(result.success);
/// ```
pub struct PlanExecutor<'a> {
    db: &'a mut Database,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self { db, dry_run: false }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor validates the plan but does not
    /// actually modify the database.
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// If in dry-run mode, validates the plan but makes no database changes.
    /// Otherwise, applies all actions in the plan to the database.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails to execute. In particular, a
    /// `CreateReservation` action whose interval was taken by a concurrent
    /// writer between planning and execution fails with
    /// [`Error::DatesUnavailable`] and writes nothing.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            return Ok(ExecutionResult::dry_run(plan));
        }

        let mut reservation = None;
        for action in &plan.actions {
            if let Some(r) = self.execute_action(action)? {
                reservation = Some(r);
            }
        }

        Ok(ExecutionResult::success(plan, reservation))
    }

    /// Executes a single action, returning the affected reservation.
    fn execute_action(&mut self, action: &PlanAction) -> Result<Option<Reservation>> {
        match action {
            PlanAction::CreateReservation(reservation) => {
                // The conditional write re-checks availability inside an
                // IMMEDIATE transaction; losing a race surfaces as a
                // conflict, exactly as if planning had seen the winner.
                let created = self.db.try_create_reservation(reservation)?;
                if !created {
                    return Err(Error::DatesUnavailable {
                        property_id: reservation.property_id(),
                        check_in: reservation.check_in(),
                        check_out: reservation.check_out(),
                    });
                }
                Ok(Some(reservation.clone()))
            }
            PlanAction::TransitionStatus {
                reservation_id,
                target,
            } => {
                let updated = self.db.transition_reservation(*reservation_id, *target)?;
                Ok(Some(updated))
            }
        }
    }
}
