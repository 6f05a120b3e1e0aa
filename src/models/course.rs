//! Course model.
//!
//! A course is the unit being scheduled: one exam event that needs enough
//! seats for its enrolled students, a fixed duration, and an instructor
//! who must be available for the whole span.

use serde::{Deserialize, Serialize};

use super::RoomKind;

/// A course that may need an exam.
///
/// # Time Representation
/// Exam duration is expressed in whole minutes. Start times are chosen by
/// the scheduler on a slot grid (see `scheduler::TimeSlotGenerator`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Human-readable name (used in failure reports).
    pub name: String,
    /// Short catalogue code (e.g. "CSE331").
    pub code: String,
    /// Instructor identifier, matched against availability windows.
    pub instructor: String,
    /// Number of seats the exam needs.
    pub student_count: u32,
    /// Exam length in minutes. Must be > 0 when `has_exam` is set.
    pub exam_duration_minutes: u32,
    /// Whether this course needs an exam at all.
    pub has_exam: bool,
    /// Room kind the exam prefers (e.g. a lab). `None` = any room.
    pub required_room: Option<RoomKind>,
    /// Owning department.
    pub department: String,
    /// Owning faculty.
    pub faculty: String,
}

impl Course {
    /// Creates a course needing an exam with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            code: String::new(),
            instructor: String::new(),
            student_count: 0,
            exam_duration_minutes: 60,
            has_exam: true,
            required_room: None,
            department: String::new(),
            faculty: String::new(),
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the catalogue code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the instructor identifier.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    /// Sets the required seat count.
    pub fn with_students(mut self, student_count: u32) -> Self {
        self.student_count = student_count;
        self
    }

    /// Sets the exam duration in minutes.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.exam_duration_minutes = minutes;
        self
    }

    /// Marks the course as not needing an exam.
    pub fn without_exam(mut self) -> Self {
        self.has_exam = false;
        self
    }

    /// Requests a specialized room kind.
    pub fn with_special_room(mut self, kind: RoomKind) -> Self {
        self.required_room = Some(kind);
        self
    }

    /// Sets department and faculty.
    pub fn with_department(
        mut self,
        department: impl Into<String>,
        faculty: impl Into<String>,
    ) -> Self {
        self.department = department.into();
        self.faculty = faculty.into();
        self
    }

    /// Whether the exam prefers a specialized room.
    pub fn requires_special_room(&self) -> bool {
        self.required_room.is_some()
    }

    /// Display label: the name, or the ID when no name is set.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// A single student-in-course enrollment record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enrollment {
    /// Course identifier.
    pub course_id: String,
    /// Student identifier (e.g. student number).
    pub student_id: String,
}

impl Enrollment {
    /// Creates an enrollment record.
    pub fn new(course_id: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            student_id: student_id.into(),
        }
    }
}
