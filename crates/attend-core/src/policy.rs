//! Attendance policy knobs.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::duration::{WorkedDuration, overtime, overtime_by_total_work};

/// How overtime is derived from a completed shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OvertimePolicy {
    /// Time worked past the standard end of day. A shift that starts after the
    /// standard end is overtime in full.
    #[default]
    AfterStandardEnd,

    /// Whole minutes worked beyond a fixed number of standard hours.
    ExceedsStandardHours {
        #[serde(default = "default_standard_work_hours")]
        standard_work_hours: u32,
    },
}

impl OvertimePolicy {
    /// Computes overtime for a shift under this policy.
    #[must_use]
    pub fn compute(
        self,
        clock_in: NaiveTime,
        clock_out: NaiveTime,
        standard_end: NaiveTime,
    ) -> WorkedDuration {
        match self {
            Self::AfterStandardEnd => overtime(clock_in, clock_out, standard_end),
            Self::ExceedsStandardHours {
                standard_work_hours,
            } => overtime_by_total_work(clock_in, clock_out, standard_work_hours),
        }
    }
}

/// Standard working hours used by [`OvertimePolicy::ExceedsStandardHours`]
/// when none are configured.
pub const DEFAULT_STANDARD_WORK_HOURS: u32 = 8;

const fn default_standard_work_hours() -> u32 {
    DEFAULT_STANDARD_WORK_HOURS
}

/// Configuration for the attendance engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendancePolicy {
    /// End of the standard working day.
    /// Default: 17:00:00.
    pub standard_end: NaiveTime,

    /// A clock-out this many hours or more before the clock-in (on the same
    /// nominal day) is rejected. Smaller backwards gaps are read as a shift
    /// that crossed midnight.
    /// Default: 16.
    pub max_backward_gap_hours: u32,

    /// Overtime rule applied on clock-out.
    pub overtime: OvertimePolicy,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            standard_end: NaiveTime::from_hms_opt(17, 0, 0).expect("17:00:00 is a valid time"),
            max_backward_gap_hours: 16,
            overtime: OvertimePolicy::default(),
        }
    }
}

impl AttendancePolicy {
    /// Returns true if `clock_out` is too far before `clock_in` to be an
    /// overnight shift.
    #[must_use]
    pub fn is_backwards(&self, clock_in: NaiveTime, clock_out: NaiveTime) -> bool {
        if clock_out >= clock_in {
            return false;
        }
        clock_in - clock_out >= Duration::hours(i64::from(self.max_backward_gap_hours))
    }

    /// Overtime for a completed shift under the configured rule.
    #[must_use]
    pub fn overtime(&self, clock_in: NaiveTime, clock_out: NaiveTime) -> WorkedDuration {
        self.overtime.compute(clock_in, clock_out, self.standard_end)
    }
}
