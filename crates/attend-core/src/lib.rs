//! Core domain logic for attendance time accounting.
//!
//! This crate contains:
//! - Duration arithmetic: elapsed time and overtime, including shifts that cross midnight
//! - Policy: the configurable standard end of day, backwards-time threshold and overtime rule
//! - Engine: clock-in/clock-out transitions over an [`AttendanceStore`]

pub mod duration;
mod engine;
mod policy;
mod record;
pub mod store;
mod types;

pub use duration::{
    ParseDurationError, WorkedDuration, elapsed, overtime, overtime_by_total_work,
};
pub use engine::{AttendanceEngine, AttendanceError, Conflict};
pub use policy::{AttendancePolicy, DEFAULT_STANDARD_WORK_HOURS, OvertimePolicy};
pub use record::AttendanceRecord;
pub use store::{AttendanceStore, StoreError};
pub use types::{AttendanceId, Employee, EmployeeId, ValidationError};
