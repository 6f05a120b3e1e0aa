//! Exam timetabling engine.
//!
//! Places each course's exam on a date, a start time and one or more
//! classrooms so that no room hosts two exams at once, no student sits two
//! exams at once, the rooms seat every student, and the instructor is
//! available. Multi-room exams favour rooms that are close together.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Classroom`, `Enrollment`,
//!   `ProximityEdge`, `AvailabilityWindow`, `ExamAssignment`, `ScheduleResult`
//! - **`constraints`**: Room, student and instructor feasibility checks
//! - **`rooms`**: Proximity index and room-combination selection
//! - **`scheduler`**: Backtracking search, configuration, slot grid, KPIs
//! - **`validation`**: Input integrity checks and timetable verification
//!
//! # Logging
//!
//! Progress is reported through `tracing`; the crate never installs a
//! subscriber.
//!
//! # References
//!
//! - Carter, Laporte & Lee (1996), "Examination Timetabling: Algorithmic
//!   Strategies and Applications"
//! - Qu et al. (2009), "A Survey of Search Methodologies and Automated System
//!   Development for Examination Timetabling"

pub mod constraints;
pub mod models;
pub mod rooms;
pub mod scheduler;
pub mod validation;
