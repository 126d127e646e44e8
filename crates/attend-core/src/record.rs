//! The per-day attendance record.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::duration::{WorkedDuration, elapsed};
use crate::policy::AttendancePolicy;
use crate::types::{AttendanceId, EmployeeId};

/// One clock-in/clock-out session for an employee on a calendar date.
///
/// A record with no `clock_out` is *open*. The derived totals stay at zero
/// until [`AttendanceRecord::close`] sets the clock-out, and are written only
/// there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Storage identifier, assigned on first save.
    pub id: Option<AttendanceId>,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub clock_in: NaiveTime,
    pub clock_out: Option<NaiveTime>,
    pub total_hours: WorkedDuration,
    pub ot_hours: WorkedDuration,
}

impl AttendanceRecord {
    /// Starts a new open record.
    #[must_use]
    pub const fn open(employee_id: EmployeeId, date: NaiveDate, clock_in: NaiveTime) -> Self {
        Self {
            id: None,
            employee_id,
            date,
            clock_in,
            clock_out: None,
            total_hours: WorkedDuration::ZERO,
            ot_hours: WorkedDuration::ZERO,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Sets the clock-out and computes the worked and overtime totals.
    ///
    /// Callers must check [`is_open`](Self::is_open) and the backwards-time
    /// rule first; this only performs the transition.
    pub(crate) fn close(&mut self, clock_out: NaiveTime, policy: &AttendancePolicy) {
        self.clock_out = Some(clock_out);
        self.total_hours = elapsed(self.clock_in, clock_out);
        self.ot_hours = policy.overtime(self.clock_in, clock_out);
    }
}
