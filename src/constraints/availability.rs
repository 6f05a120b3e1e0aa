//! Instructor availability checks.

use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

use crate::models::AvailabilityWindow;

/// Answers "is this instructor free for this span?" from declared windows.
///
/// # Rules
/// 1. No window for (instructor, date) → available (open world).
/// 2. Otherwise available iff a single "available" window covers the whole
///    span. "Unavailable" windows never count as coverage, and windows are
///    never unioned.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityChecker {
    windows: HashMap<String, HashMap<NaiveDate, Vec<AvailabilityWindow>>>,
}

impl AvailabilityChecker {
    /// Indexes windows by instructor and date.
    pub fn new(windows: &[AvailabilityWindow]) -> Self {
        let mut index: HashMap<String, HashMap<NaiveDate, Vec<AvailabilityWindow>>> =
            HashMap::new();
        for w in windows {
            index
                .entry(w.instructor.clone())
                .or_default()
                .entry(w.date)
                .or_default()
                .push(w.clone());
        }
        Self { windows: index }
    }

    /// Declared windows for an instructor on a date (possibly empty).
    pub fn windows_for(&self, instructor: &str, date: NaiveDate) -> &[AvailabilityWindow] {
        self.windows
            .get(instructor)
            .and_then(|by_date| by_date.get(&date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the instructor can supervise `[start, end)` on `date`.
    pub fn is_available(
        &self,
        instructor: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> bool {
        let windows = self.windows_for(instructor, date);
        if windows.is_empty() {
            return true;
        }

        windows
            .iter()
            .any(|w| w.is_available && w.covers(start, end))
    }

    /// Number of instructors with at least one declared window.
    pub fn instructor_count(&self) -> usize {
        self.windows.len()
    }
}
