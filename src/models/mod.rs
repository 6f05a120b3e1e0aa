//! Exam timetabling domain models.
//!
//! Read-only input views (courses, classrooms, enrollments, proximity,
//! availability) and the output types produced by a scheduling run.
//!
//! # Domain Mappings
//!
//! | exam-schedule | Generic scheduling |
//! |---------------|--------------------|
//! | Course | Task with a single activity |
//! | Classroom | Capacitated resource |
//! | AvailabilityWindow | Resource calendar window |
//! | ExamAssignment | Activity → resource × time |

mod availability;
mod classroom;
mod course;
mod proximity;
mod schedule;

pub use availability::{intervals_overlap, AvailabilityWindow};
pub use classroom::{Classroom, RoomKind};
pub use course::{Course, Enrollment};
pub use proximity::ProximityEdge;
pub use schedule::{
    ExamAssignment, ExamGroup, ScheduleResult, ScheduleStatistics, Violation, ViolationType,
};
