//! Wall-clock times of day and half-open ranges between them.
//!
//! Times are naive local values with no date and no timezone. A range never
//! crosses midnight: `[start, end)` is only meaningful when `start < end`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{ConstraintError, Result};

/// Minutes in one day; every [`TimeOfDay`] is strictly below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day with minute precision, stored as minutes since midnight.
///
/// Serializes as a zero-padded 24-hour `"HH:MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight, the earliest representable time.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Build from hours and minutes; `None` when either is out of range.
    pub fn from_hm(hours: u16, minutes: u16) -> Option<Self> {
        (hours < 24 && minutes < 60).then(|| TimeOfDay(hours * 60 + minutes))
    }

    /// Build from minutes since midnight; `None` at or past 24:00.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(TimeOfDay(minutes))
    }

    /// Parse a 24-hour `HH:MM` string such as `"09:30"` or `"9:30"`.
    pub fn parse(s: &str) -> Result<Self> {
        let time = NaiveTime::parse_from_str(s, "%H:%M")
            .map_err(|_| ConstraintError::InvalidTime(s.to_string()))?;
        // Both components are bounded by chrono (hour < 24, minute < 60).
        Ok(TimeOfDay((time.hour() * 60 + time.minute()) as u16))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self> {
        TimeOfDay::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ConstraintError;

    fn try_from(s: String) -> Result<Self> {
        TimeOfDay::parse(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// A half-open time-of-day range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Whether two ranges share at least one minute.
    ///
    /// Two half-open ranges overlap iff `a.start < b.end && b.start < a.end`,
    /// so a range ending at 12:00 does not overlap one starting at 12:00.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the shared part of two ranges, 0 when they do not overlap.
    ///
    /// An inverted range can still pass [`overlaps`](Self::overlaps) while
    /// sharing no minute (e.g. 22:00-06:00 against 00:00-23:59), so the
    /// result saturates at 0.
    pub fn overlap_minutes(&self, other: &TimeRange) -> u16 {
        if !self.overlaps(other) {
            return 0;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.minutes().saturating_sub(start.minutes())
    }

    /// Length of the range in minutes, 0 for an empty or inverted range.
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Overlap test on raw `"HH:MM"` strings.
///
/// Lenient by contract: if any of the four strings fails to parse the ranges
/// are reported as not overlapping, never as an error. Callers that need to
/// distinguish bad input should parse with [`TimeOfDay::parse`] instead.
pub fn time_ranges_overlap(start1: &str, end1: &str, start2: &str, end2: &str) -> bool {
    let parsed = (
        TimeOfDay::parse(start1),
        TimeOfDay::parse(end1),
        TimeOfDay::parse(start2),
        TimeOfDay::parse(end2),
    );
    match parsed {
        (Ok(s1), Ok(e1), Ok(s2), Ok(e2)) => TimeRange::new(s1, e1).overlaps(&TimeRange::new(s2, e2)),
        _ => false,
    }
}
