//! Run parameters for the exam scheduler.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TimeSlotGenerator;

/// Invalid scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The search horizon has no days.
    #[error("number of days must be at least 1")]
    ZeroDays,
    /// Slot granularity of zero minutes.
    #[error("slot length must be at least 1 minute")]
    ZeroSlotLength,
    /// Working hours are empty or run past midnight.
    #[error("invalid working hours {start}:00-{end}:00")]
    InvalidWorkingHours { start: u32, end: u32 },
    /// An attempt ceiling of zero would never evaluate anything.
    #[error("attempt budget must be positive when set")]
    ZeroAttemptBudget,
}

/// Scheduler run parameters.
///
/// Deserializable from any serde format; missing fields take defaults.
///
/// # Defaults
/// 7 days starting today, 08:00-18:00, 30-minute slots, at most
/// 1,000,000 evaluated (date, slot) candidates, group-id seed 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of consecutive days to consider.
    pub days: u32,
    /// First exam day. `None` = today (local time).
    pub start_date: Option<NaiveDate>,
    /// First hour of the working day.
    pub start_hour: u32,
    /// Hour by which every exam must have ended.
    pub end_hour: u32,
    /// Slot granularity in minutes.
    pub slot_minutes: u32,
    /// Ceiling on evaluated (date, slot) candidates. `None` = unbounded.
    pub max_attempts: Option<u64>,
    /// Seed for exam group identifiers.
    pub group_id_seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            days: 7,
            start_date: None,
            start_hour: 8,
            end_hour: 18,
            slot_minutes: 30,
            max_attempts: Some(1_000_000),
            group_id_seed: 0,
        }
    }
}

impl SearchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of days.
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Sets the first exam day.
    pub fn starting_on(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the working-hours window.
    pub fn with_working_hours(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        self
    }

    /// Sets the slot granularity.
    pub fn with_slot_minutes(mut self, minutes: u32) -> Self {
        self.slot_minutes = minutes;
        self
    }

    /// Caps the number of evaluated candidates.
    pub fn with_max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Removes the candidate ceiling.
    pub fn unbounded(mut self) -> Self {
        self.max_attempts = None;
        self
    }

    /// Sets the group-id seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.group_id_seed = seed;
        self
    }

    /// Checks the parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::ZeroDays);
        }
        if self.slot_minutes == 0 {
            return Err(ConfigError::ZeroSlotLength);
        }
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(ConfigError::InvalidWorkingHours {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::ZeroAttemptBudget);
        }
        Ok(())
    }

    /// First exam day, resolving `None` to today.
    pub fn resolved_start_date(&self) -> NaiveDate {
        self.start_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Slot generator for these working hours.
    pub fn time_slots(&self) -> TimeSlotGenerator {
        TimeSlotGenerator::new(self.start_hour, self.end_hour, self.slot_minutes)
    }
}
