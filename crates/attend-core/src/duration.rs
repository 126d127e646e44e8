//! Worked-time arithmetic.
//!
//! All calculations operate on time-of-day values for a single attendance
//! record. A clock-out that is numerically earlier than its clock-in is read as
//! a shift that crossed midnight.
//!
//! # Midnight correction
//!
//! An overnight span is measured as `(midnight - start) + (end - 00:00) + 1s`.
//! The extra second is part of the stored history of computed values and is
//! reproduced exactly, so `elapsed(22:00:00, 06:00:00)` is `8:00:01`.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;

/// A non-negative duration with whole-second precision.
///
/// Renders as `H:MM:SS`, where the hour component is unbounded and minutes and
/// seconds are zero padded. The same format is accepted by [`FromStr`] and is
/// used for serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkedDuration(i64);

impl WorkedDuration {
    /// The zero duration, rendered `0:00:00`.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from whole seconds. Negative input clamps to zero.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        if secs < 0 { Self(0) } else { Self(secs) }
    }

    /// Creates a duration from a chrono delta, truncating sub-second precision.
    #[must_use]
    pub fn from_delta(delta: Duration) -> Self {
        Self::from_secs(delta.num_seconds())
    }

    /// Total length in whole seconds.
    #[must_use]
    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// Total length in whole minutes, truncated.
    #[must_use]
    pub const fn as_minutes(self) -> i64 {
        self.0 / SECONDS_PER_MINUTE
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WorkedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / SECONDS_PER_HOUR;
        let minutes = (self.0 % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = self.0 % SECONDS_PER_MINUTE;
        write!(f, "{hours}:{minutes:02}:{seconds:02}")
    }
}

impl Add for WorkedDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for WorkedDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Error returned when a string is not a valid `H:MM:SS` duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration '{0}': expected H:MM:SS")]
pub struct ParseDurationError(String);

impl FromStr for WorkedDuration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDurationError(s.to_string());

        let mut parts = s.split(':');
        let (Some(hours), Some(minutes), Some(seconds), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err());
        };

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(hours) || !all_digits(minutes) || !all_digits(seconds) {
            return Err(err());
        }
        if minutes.len() != 2 || seconds.len() != 2 {
            return Err(err());
        }

        let hours: i64 = hours.parse().map_err(|_| err())?;
        let minutes: i64 = minutes.parse().map_err(|_| err())?;
        let seconds: i64 = seconds.parse().map_err(|_| err())?;
        if minutes >= 60 || seconds >= 60 {
            return Err(err());
        }

        hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|h| h.checked_add(minutes * SECONDS_PER_MINUTE + seconds))
            .map(Self)
            .ok_or_else(err)
    }
}

impl Serialize for WorkedDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WorkedDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Time worked between `start` and `end`.
///
/// If `end` is earlier than `start` the shift is treated as crossing midnight
/// and the one-second midnight correction is applied.
#[must_use]
pub fn elapsed(start: NaiveTime, end: NaiveTime) -> WorkedDuration {
    let delta = if end < start {
        let before_midnight = Duration::days(1) - (start - NaiveTime::MIN);
        let after_midnight = end - NaiveTime::MIN;
        before_midnight + after_midnight + Duration::seconds(1)
    } else {
        end - start
    };
    WorkedDuration::from_delta(delta)
}

/// Overtime relative to the end of the standard working day.
///
/// A shift that starts at or before `standard_end` only earns overtime for the
/// part after `standard_end`. A shift that starts after it is overtime in full,
/// including any midnight crossing.
#[must_use]
pub fn overtime(start: NaiveTime, end: NaiveTime, standard_end: NaiveTime) -> WorkedDuration {
    if start <= standard_end {
        if end <= standard_end {
            return WorkedDuration::ZERO;
        }
        return WorkedDuration::from_delta(end - standard_end);
    }
    elapsed(start, end)
}

/// Overtime as whole minutes worked beyond `standard_work_hours`.
///
/// Seconds are always zero in the result (`H:MM:00`).
#[must_use]
pub fn overtime_by_total_work(
    start: NaiveTime,
    end: NaiveTime,
    standard_work_hours: u32,
) -> WorkedDuration {
    let worked_minutes = elapsed(start, end).as_minutes();
    let standard_minutes = i64::from(standard_work_hours) * 60;
    if worked_minutes <= standard_minutes {
        return WorkedDuration::ZERO;
    }
    WorkedDuration::from_secs((worked_minutes - standard_minutes) * SECONDS_PER_MINUTE)
}
