//! Instructor availability windows.
//!
//! A window declares that an instructor is (or is not) available on a date
//! between two wall-clock times.
//!
//! # Time Model
//! Windows are half-open `[start, end)` intervals on a single date.
//! An instructor with no window on a date is fully available that day.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A declared availability (or unavailability) period for an instructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    /// Instructor identifier.
    pub instructor: String,
    /// Calendar date the window applies to.
    pub date: NaiveDate,
    /// Window start (inclusive).
    pub start: NaiveTime,
    /// Window end (exclusive).
    pub end: NaiveTime,
    /// `false` marks an explicit unavailability period.
    pub is_available: bool,
}

impl AvailabilityWindow {
    /// Creates an "available" window.
    pub fn available(
        instructor: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self {
            instructor: instructor.into(),
            date,
            start,
            end,
            is_available: true,
        }
    }

    /// Creates an "unavailable" window.
    pub fn unavailable(
        instructor: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self {
            is_available: false,
            ..Self::available(instructor, date, start, end)
        }
    }

    /// Whether this window fully contains `[start, end)`.
    #[inline]
    pub fn covers(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start <= start && self.end >= end
    }
}

/// Half-open interval overlap: `not (a_end <= b_start or a_start >= b_end)`.
///
/// Touching intervals (one ends exactly when the other starts) do not overlap.
#[inline]
pub fn intervals_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    !(a_end <= b_start || a_start >= b_end)
}
