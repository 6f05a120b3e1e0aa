//! Hard constraints checked for every candidate placement.
//!
//! - [`AvailabilityChecker`]: instructor must be free for the whole span.
//! - [`ConflictChecker`]: no double-booked room, no student sitting two
//!   overlapping exams.
//!
//! Both are built once per run from read-only input snapshots and passed
//! into the search explicitly.

mod availability;
mod conflict;

pub use availability::AvailabilityChecker;
pub use conflict::{ConflictChecker, EnrollmentIndex};
