//! Room and student conflict checks.
//!
//! Both checks use half-open overlap on the same date: two spans clash iff
//! `not (existing_end <= new_start or existing_start >= new_end)`.

use chrono::{NaiveDate, NaiveTime};
use std::collections::{HashMap, HashSet};

use crate::models::{Enrollment, ExamAssignment};

/// Course → enrolled students lookup, built once per run.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentIndex {
    students: HashMap<String, HashSet<String>>,
}

impl EnrollmentIndex {
    /// Builds the index from enrollment records.
    pub fn new(enrollments: &[Enrollment]) -> Self {
        let mut students: HashMap<String, HashSet<String>> = HashMap::new();
        for e in enrollments {
            students
                .entry(e.course_id.clone())
                .or_default()
                .insert(e.student_id.clone());
        }
        Self { students }
    }

    /// Students enrolled in a course, if any are known.
    pub fn students_of(&self, course_id: &str) -> Option<&HashSet<String>> {
        self.students.get(course_id)
    }

    /// Whether two courses have at least one student in common.
    ///
    /// Courses without enrollment data share nobody.
    pub fn shares_students(&self, a: &str, b: &str) -> bool {
        match (self.students.get(a), self.students.get(b)) {
            (Some(sa), Some(sb)) => !sa.is_disjoint(sb),
            _ => false,
        }
    }

    /// Number of courses with enrollment data.
    pub fn course_count(&self) -> usize {
        self.students.len()
    }
}

/// Detects clashes between a candidate placement and committed ones.
#[derive(Debug, Clone, Default)]
pub struct ConflictChecker {
    enrollments: EnrollmentIndex,
}

impl ConflictChecker {
    /// Creates a checker over an enrollment index.
    pub fn new(enrollments: EnrollmentIndex) -> Self {
        Self { enrollments }
    }

    /// The enrollment lookup used for student checks.
    pub fn enrollments(&self) -> &EnrollmentIndex {
        &self.enrollments
    }

    /// Whether `classroom_id` is already booked during `[start, end)` on `date`.
    pub fn room_conflict(
        existing: &[ExamAssignment],
        classroom_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> bool {
        existing
            .iter()
            .any(|a| a.classroom_id == classroom_id && a.overlaps(date, start, end))
    }

    /// Whether an exam of `course_id` during `[start, end)` on `date`
    /// overlaps an existing exam of a course sharing at least one student.
    ///
    /// Every room of a multi-room exam shares date and time, so one call
    /// covers the whole group.
    pub fn student_conflict(
        &self,
        existing: &[ExamAssignment],
        course_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> bool {
        let Some(students) = self.enrollments.students_of(course_id) else {
            return false;
        };
        if students.is_empty() {
            return false;
        }

        existing.iter().any(|a| {
            a.overlaps(date, start, end)
                && self
                    .enrollments
                    .students_of(&a.course_id)
                    .is_some_and(|other| !students.is_disjoint(other))
        })
    }
}
