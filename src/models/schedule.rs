//! Exam timetable (solution) model.
//!
//! A schedule result is the outcome of one scheduling run: a flag, a
//! summary, every room-level exam assignment, and run statistics. Exams
//! spread over several rooms produce one assignment per room, tied
//! together by a shared `exam_group_id`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::availability::intervals_overlap;

/// One course placed into one classroom at one date/time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamAssignment {
    /// Course being examined.
    pub course_id: String,
    /// Classroom hosting (part of) the exam.
    pub classroom_id: String,
    /// Exam date.
    pub date: NaiveDate,
    /// Start time (inclusive).
    pub start_time: NaiveTime,
    /// End time (exclusive).
    pub end_time: NaiveTime,
    /// Shared by every room serving the same exam instance.
    pub exam_group_id: String,
}

impl ExamAssignment {
    /// Creates an assignment.
    pub fn new(
        course_id: impl Into<String>,
        classroom_id: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exam_group_id: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            classroom_id: classroom_id.into(),
            date,
            start_time,
            end_time,
            exam_group_id: exam_group_id.into(),
        }
    }

    /// Whether this assignment intersects `[start, end)` on `date`.
    #[inline]
    pub fn overlaps(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        self.date == date && intervals_overlap(self.start_time, self.end_time, start, end)
    }
}

/// A logical exam: all rooms sharing one `exam_group_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamGroup {
    /// Group identifier.
    pub group_id: String,
    /// Course being examined.
    pub course_id: String,
    /// Exam date.
    pub date: NaiveDate,
    /// Start time.
    pub start_time: NaiveTime,
    /// End time.
    pub end_time: NaiveTime,
    /// Rooms used, in assignment order.
    pub classroom_ids: Vec<String>,
}

/// Statistics for a scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStatistics {
    /// Courses that needed an exam.
    pub total_courses: usize,
    /// Courses present in the returned assignments.
    pub scheduled_courses: usize,
    /// Names of courses that could not be placed.
    pub failed_courses: Vec<String>,
    /// Distinct classrooms used by the returned assignments.
    pub total_classrooms_used: usize,
    /// (date, slot) candidates evaluated.
    pub attempts: u64,
    /// Placements undone after a dead end further down.
    pub backtracks: u64,
    /// Whether the attempt ceiling stopped the search.
    pub budget_exhausted: bool,
}

/// Outcome of one scheduling run.
///
/// Infeasibility is a normal outcome: callers branch on `success`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Whether every course was placed.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Room-level assignments (partial on failure).
    pub assignments: Vec<ExamAssignment>,
    /// Run statistics.
    pub statistics: ScheduleStatistics,
}

/// A broken timetable invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (course, classroom, or group).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of timetable violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two exams overlap in the same room.
    RoomConflict,
    /// A student sits two overlapping exams.
    StudentConflict,
    /// Assigned rooms seat fewer students than required.
    CapacityShortfall,
    /// Exam falls outside the instructor's declared availability.
    InstructorUnavailable,
    /// Assignments of one group disagree on course, date or time.
    GroupMismatch,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl ScheduleResult {
    /// Creates a failed result with no assignments.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Returns all assignments for a course.
    pub fn assignments_for_course(&self, course_id: &str) -> Vec<&ExamAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.course_id == course_id)
            .collect()
    }

    /// Returns all assignments for a classroom.
    pub fn assignments_for_classroom(&self, classroom_id: &str) -> Vec<&ExamAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.classroom_id == classroom_id)
            .collect()
    }

    /// Distinct classrooms used.
    pub fn classrooms_used(&self) -> HashSet<&str> {
        self.assignments
            .iter()
            .map(|a| a.classroom_id.as_str())
            .collect()
    }

    /// Groups assignments into logical exams, in first-appearance order.
    ///
    /// Date and time are taken from the first assignment of each group.
    pub fn exam_groups(&self) -> Vec<ExamGroup> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<ExamGroup> = Vec::new();

        for a in &self.assignments {
            match index.get(a.exam_group_id.as_str()) {
                Some(&i) => groups[i].classroom_ids.push(a.classroom_id.clone()),
                None => {
                    index.insert(&a.exam_group_id, groups.len());
                    groups.push(ExamGroup {
                        group_id: a.exam_group_id.clone(),
                        course_id: a.course_id.clone(),
                        date: a.date,
                        start_time: a.start_time,
                        end_time: a.end_time,
                        classroom_ids: vec![a.classroom_id.clone()],
                    });
                }
            }
        }
        groups
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}
