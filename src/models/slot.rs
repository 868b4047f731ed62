//! Time-of-day slot models.
//!
//! A [`Slot`] keeps the exact `HH:MM` strings it was configured with, so the
//! rendered timetable reproduces the catalog verbatim. Arithmetic happens on
//! the resolved [`SlotTimes`], which may fail for malformed strings.
//!
//! # Time Model
//! Slots are half-open intervals [start, end) within a single day.
//! Two intervals that merely touch (one ends when the other starts) do not
//! overlap.

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format used for every time-of-day string.
pub const TIME_FORMAT: &str = "%H:%M";

/// A configured time-of-day interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Start time as configured (`HH:MM`).
    pub start: String,
    /// End time as configured (`HH:MM`).
    pub end: String,
}

/// Resolved start/end times of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTimes {
    /// Interval start (inclusive).
    pub start: NaiveTime,
    /// Interval end (exclusive).
    pub end: NaiveTime,
}

/// A time string that could not be parsed as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid time '{value}': expected HH:MM")]
pub struct SlotTimeError {
    /// The offending string.
    pub value: String,
}

impl Slot {
    /// Creates a slot from start/end strings.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Display label, `"HH:MM - HH:MM"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }

    /// Parses both ends of the slot.
    pub fn resolve(&self) -> Result<SlotTimes, SlotTimeError> {
        Ok(SlotTimes {
            start: parse_time_of_day(&self.start)?,
            end: parse_time_of_day(&self.end)?,
        })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

impl SlotTimes {
    /// Duration of the interval (end - start).
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Duration in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Whether two intervals overlap.
    ///
    /// Equivalent to `!(self.end <= other.start || self.start >= other.end)`.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Parses an `HH:MM` time of day.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, SlotTimeError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| SlotTimeError {
        value: value.to_string(),
    })
}

/// Converts a duration in hours (1.0, 1.5) to whole minutes.
pub fn hours_to_minutes(hours: f64) -> i64 {
    (hours * 60.0).round() as i64
}
