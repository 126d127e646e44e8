//! Clock-in and clock-out state transitions.
//!
//! # Algorithm Summary
//!
//! 1. Confirm the employee exists.
//! 2. Load the employee's records for the day from the store.
//! 3. Validate the action against those records (at most one open record).
//! 4. For clock-out, apply the backwards-time rule and compute totals.
//! 5. Save through the store, which enforces open-record uniqueness.
//!
//! Nothing is saved on any error path.

use std::fmt;

use chrono::{Local, NaiveDate, NaiveTime};
use thiserror::Error;

use crate::policy::AttendancePolicy;
use crate::record::AttendanceRecord;
use crate::store::{AttendanceStore, StoreError};
use crate::types::EmployeeId;

/// Why an action is invalid for the employee's current attendance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// A clock-in was attempted while a record is still open.
    AlreadyClockedIn,
    /// A clock-out was attempted with no record for the day.
    NoClockIn,
    /// A clock-out was attempted but every record for the day is closed.
    AlreadyClockedOut,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AlreadyClockedIn => "employee already clocked in but not clocked out",
            Self::NoClockIn => "no clock-in record found for today",
            Self::AlreadyClockedOut => "employee already clocked out",
        };
        write!(f, "{s}")
    }
}

/// Errors returned by [`AttendanceEngine`] operations.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// The employee does not exist.
    #[error("employee not found with id: {employee_id}")]
    NotFound { employee_id: EmployeeId },

    /// The action does not fit the current attendance state.
    #[error("{0}")]
    ConflictState(Conflict),

    /// The clock-out is too far before the clock-in to be an overnight shift.
    #[error("clock out time {clock_out} cannot be before clock in time {clock_in}")]
    InvalidArgument {
        clock_in: NaiveTime,
        clock_out: NaiveTime,
    },

    /// The store could not be reached. Safe to retry with backoff.
    #[error(transparent)]
    Unavailable(StoreError),

    /// The store failed in a way that retrying will not fix.
    #[error(transparent)]
    Storage(StoreError),
}

impl AttendanceError {
    /// Returns true if the caller may retry the same action unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<StoreError> for AttendanceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::OpenRecordExists(_) => Self::ConflictState(Conflict::AlreadyClockedIn),
            StoreError::RecordNotOpen(_) => Self::ConflictState(Conflict::AlreadyClockedOut),
            StoreError::EmployeeMissing(employee_id) => Self::NotFound { employee_id },
            StoreError::Unavailable(_) => Self::Unavailable(err),
            StoreError::Backend(_) => Self::Storage(err),
        }
    }
}

/// Applies clock actions against an [`AttendanceStore`].
///
/// The engine keeps no state between calls beyond its store and policy.
#[derive(Debug)]
pub struct AttendanceEngine<S> {
    store: S,
    policy: AttendancePolicy,
}

impl<S: AttendanceStore> AttendanceEngine<S> {
    pub const fn new(store: S, policy: AttendancePolicy) -> Self {
        Self { store, policy }
    }

    pub const fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Clocks the employee in at `time` on today's local date.
    pub fn clock_in(
        &mut self,
        employee_id: EmployeeId,
        time: NaiveTime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        self.clock_in_on(employee_id, Local::now().date_naive(), time)
    }

    /// Clocks the employee in at `time` on `date`.
    pub fn clock_in_on(
        &mut self,
        employee_id: EmployeeId,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        self.require_employee(employee_id)?;

        let records = self
            .store
            .find_attendance_by_employee_and_date(employee_id, date)?;
        if records.iter().any(AttendanceRecord::is_open) {
            tracing::warn!(%employee_id, %date, "clock-in rejected: already clocked in");
            return Err(AttendanceError::ConflictState(Conflict::AlreadyClockedIn));
        }

        let saved = self
            .store
            .save(AttendanceRecord::open(employee_id, date, time))?;
        tracing::info!(%employee_id, %date, clock_in = %time, "clocked in");
        Ok(saved)
    }

    /// Clocks the employee out at `time` on today's local date.
    pub fn clock_out(
        &mut self,
        employee_id: EmployeeId,
        time: NaiveTime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        self.clock_out_on(employee_id, Local::now().date_naive(), time)
    }

    /// Clocks the employee out at `time`, closing their open record on `date`.
    pub fn clock_out_on(
        &mut self,
        employee_id: EmployeeId,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<AttendanceRecord, AttendanceError> {
        self.require_employee(employee_id)?;

        let records = self
            .store
            .find_attendance_by_employee_and_date(employee_id, date)?;
        if records.is_empty() {
            tracing::warn!(%employee_id, %date, "clock-out rejected: no clock-in");
            return Err(AttendanceError::ConflictState(Conflict::NoClockIn));
        }
        let Some(mut record) = records.into_iter().find(AttendanceRecord::is_open) else {
            tracing::warn!(%employee_id, %date, "clock-out rejected: already clocked out");
            return Err(AttendanceError::ConflictState(Conflict::AlreadyClockedOut));
        };

        if self.policy.is_backwards(record.clock_in, time) {
            tracing::warn!(
                %employee_id,
                clock_in = %record.clock_in,
                clock_out = %time,
                "clock-out rejected: before clock-in"
            );
            return Err(AttendanceError::InvalidArgument {
                clock_in: record.clock_in,
                clock_out: time,
            });
        }

        record.close(time, &self.policy);
        let saved = self.store.save(record)?;
        tracing::info!(
            %employee_id,
            %date,
            clock_out = %time,
            total_hours = %saved.total_hours,
            ot_hours = %saved.ot_hours,
            "clocked out"
        );
        Ok(saved)
    }

    fn require_employee(&self, employee_id: EmployeeId) -> Result<(), AttendanceError> {
        if self.store.find_employee(employee_id)?.is_none() {
            tracing::debug!(%employee_id, "employee lookup missed");
            return Err(AttendanceError::NotFound { employee_id });
        }
        Ok(())
    }
}
