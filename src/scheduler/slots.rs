//! Candidate start times within the working day.

use chrono::{NaiveTime, Timelike};

/// Produces start times covering `[start_hour:00, end_hour:00)` on a fixed grid.
///
/// Pure: the same parameters always yield the same ordered sequence, which
/// fixes the search's tie-breaking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlotGenerator {
    start_hour: u32,
    end_hour: u32,
    slot_minutes: u32,
}

const MINUTES_PER_DAY: u32 = 24 * 60;

impl TimeSlotGenerator {
    /// Creates a generator. `slot_minutes` of 0 yields no slots.
    pub fn new(start_hour: u32, end_hour: u32, slot_minutes: u32) -> Self {
        Self {
            start_hour,
            end_hour,
            slot_minutes,
        }
    }

    /// All candidate start times, earliest first.
    pub fn generate(&self) -> Vec<NaiveTime> {
        if self.slot_minutes == 0 {
            return Vec::new();
        }
        let first = self.start_hour * 60;
        let last = self.ceiling_minutes();
        (first..last)
            .step_by(self.slot_minutes as usize)
            .filter_map(|m| NaiveTime::from_hms_opt(m / 60, m % 60, 0))
            .collect()
    }

    /// Minutes after midnight by which exams must end.
    pub fn ceiling_minutes(&self) -> u32 {
        (self.end_hour * 60).min(MINUTES_PER_DAY)
    }

    /// End time of an exam starting at `start`, or `None` if it would run
    /// past the working-hours ceiling.
    pub fn end_for(&self, start: NaiveTime, duration_minutes: u32) -> Option<NaiveTime> {
        let start_minutes = start.num_seconds_from_midnight() / 60;
        let end_minutes = start_minutes.checked_add(duration_minutes)?;
        if end_minutes > self.ceiling_minutes() {
            return None;
        }
        NaiveTime::from_num_seconds_from_midnight_opt(end_minutes * 60, 0)
    }
}
