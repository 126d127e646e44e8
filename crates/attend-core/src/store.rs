//! The persistence boundary used by the engine.
//!
//! # Open-record uniqueness
//!
//! The engine checks for an open record and then writes, which is not atomic.
//! Implementations must close the gap at the storage boundary:
//!
//! - Saving a new open record (no `id`) while another open record exists for
//!   the same employee fails with [`StoreError::OpenRecordExists`].
//! - Saving a closed record whose stored copy is already closed fails with
//!   [`StoreError::RecordNotOpen`].
//!
//! A unique index on `employee_id` filtered to rows without a clock-out, plus a
//! guarded update, satisfies both. Holding a per-employee lock around the
//! read-validate-write sequence is also acceptable.
//!
//! Calls must be synchronous and fail fast. A backend that cannot answer in
//! bounded time reports [`StoreError::Unavailable`]. Failures that will not go
//! away on retry, such as a stored row that cannot be decoded, are
//! [`StoreError::Backend`].

use chrono::NaiveDate;
use thiserror::Error;

use crate::record::AttendanceRecord;
use crate::types::{AttendanceId, Employee, EmployeeId};

/// Errors reported by an [`AttendanceStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another open record already exists for the employee.
    #[error("employee {0} already has an open attendance record")]
    OpenRecordExists(EmployeeId),

    /// The record was closed by another writer.
    #[error("attendance record {0} is no longer open")]
    RecordNotOpen(AttendanceId),

    /// The employee was removed before the record could be written.
    #[error("employee {0} no longer exists")]
    EmployeeMissing(EmployeeId),

    /// The backend could not be reached or timed out.
    #[error("attendance storage unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend answered but failed permanently, e.g. on corrupt data.
    #[error("attendance storage error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Storage for employees and attendance records.
///
/// See the [module documentation](self) for the uniqueness contract.
pub trait AttendanceStore {
    /// Looks up an employee by ID.
    fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError>;

    /// Returns every record for the employee on `date`, in any order.
    fn find_attendance_by_employee_and_date(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Inserts or updates a record and returns the stored copy.
    ///
    /// A record without an `id` is inserted and the returned copy carries the
    /// assigned ID.
    fn save(&mut self, record: AttendanceRecord) -> Result<AttendanceRecord, StoreError>;
}

impl<S: AttendanceStore + ?Sized> AttendanceStore for &mut S {
    fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        (**self).find_employee(id)
    }

    fn find_attendance_by_employee_and_date(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        (**self).find_attendance_by_employee_and_date(employee_id, date)
    }

    fn save(&mut self, record: AttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        (**self).save(record)
    }
}
