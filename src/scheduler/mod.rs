//! Exam search and KPI evaluation.
//!
//! Provides the backtracking exam scheduler, its configuration, the
//! time-slot grid, and timetable quality metrics.
//!
//! # Algorithm
//!
//! `ExamScheduler` is a depth-first chronological backtracking search over
//! courses ordered by decreasing enrollment. Candidates are tried in
//! (date, slot) order and the first consistent full placement wins. It is
//! not optimal, but it is complete within the configured horizon and
//! attempt budget.
//!
//! # KPI
//!
//! `ScheduleKpi` computes seat usage, wasted seats, multi-room exams, and
//! the spread of exams over days.
//!
//! # References
//!
//! - Carter, Laporte & Lee (1996), "Examination Timetabling: Algorithmic
//!   Strategies and Applications"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//!   Ch. 6 (Backtracking Search for CSPs)

mod config;
mod kpi;
mod search;
mod slots;

pub use config::{ConfigError, SearchConfig};
pub use kpi::ScheduleKpi;
pub use search::{ExamScheduler, ScheduleInput};
pub use slots::TimeSlotGenerator;
