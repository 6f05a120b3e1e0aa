//! Input validation and timetable verification.
//!
//! [`validate_input`] checks structural integrity of the data before
//! scheduling. Detects:
//! - Duplicate course or classroom IDs
//! - Zero capacities and zero exam durations
//! - Proximity edges naming unknown rooms or carrying distances outside `[0, 1)`
//! - Availability windows that end before they start
//!
//! [`verify_schedule`] checks a produced timetable against the hard
//! constraints: one exam per room at a time, no student in two exams at
//! once, enough seats, instructor availability, and consistent exam groups.

use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::constraints::{AvailabilityChecker, EnrollmentIndex};
use crate::models::{intervals_overlap, ExamGroup, ScheduleResult, Violation, ViolationType};
use crate::scheduler::ScheduleInput;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A classroom seats nobody.
    InvalidCapacity,
    /// An exam lasts zero minutes.
    InvalidDuration,
    /// A proximity edge references a classroom that doesn't exist.
    UnknownClassroom,
    /// A proximity distance lies outside `[0, 1)`.
    InvalidDistance,
    /// An availability window ends at or before its start.
    InvalidWindow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for an exam scheduling run.
///
/// Checks:
/// 1. No duplicate course IDs
/// 2. No duplicate classroom IDs
/// 3. Every classroom seats at least one student
/// 4. Every exam lasts at least one minute
/// 5. Proximity edges reference existing classrooms
/// 6. Proximity distances lie in `[0, 1)`
/// 7. Availability windows end after they start
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(input: &ScheduleInput) -> ValidationResult {
    let mut errors = Vec::new();

    let mut classroom_ids = HashSet::new();
    for room in &input.classrooms {
        if !classroom_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate classroom ID: {}", room.id),
            ));
        }
        if room.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Classroom '{}' has zero capacity", room.id),
            ));
        }
    }

    let mut course_ids = HashSet::new();
    for course in &input.courses {
        if !course_ids.insert(course.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }
        if course.has_exam && course.exam_duration_minutes == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Course '{}' has a zero-minute exam", course.id),
            ));
        }
    }

    for edge in &input.proximity {
        for room in [&edge.from, &edge.to] {
            if !classroom_ids.contains(room.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownClassroom,
                    format!(
                        "Proximity edge {} -> {} references unknown classroom '{}'",
                        edge.from, edge.to, room
                    ),
                ));
            }
        }
        if !(0.0..1.0).contains(&edge.distance) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDistance,
                format!(
                    "Proximity edge {} -> {} has distance {} outside [0, 1)",
                    edge.from, edge.to, edge.distance
                ),
            ));
        }
    }

    for window in &input.availability {
        if window.end <= window.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWindow,
                format!(
                    "Availability window for '{}' on {} ends at {} before starting at {}",
                    window.instructor, window.date, window.end, window.start
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks a produced timetable against the hard constraints.
///
/// Returns every violation found; an empty list means the timetable is
/// valid. Only the assignments are inspected, so partial results can be
/// verified too.
pub fn verify_schedule(result: &ScheduleResult, input: &ScheduleInput) -> Vec<Violation> {
    let mut violations = Vec::new();
    let groups = result.exam_groups();

    check_group_integrity(result, &groups, &mut violations);
    check_room_conflicts(result, &mut violations);
    check_student_conflicts(input, &groups, &mut violations);
    check_capacity(input, &groups, &mut violations);
    check_availability(input, &groups, &mut violations);

    violations
}

fn check_group_integrity(result: &ScheduleResult, groups: &[ExamGroup], out: &mut Vec<Violation>) {
    for group in groups {
        let members = result
            .assignments
            .iter()
            .filter(|a| a.exam_group_id == group.group_id);
        for a in members {
            if a.course_id != group.course_id
                || a.date != group.date
                || a.start_time != group.start_time
                || a.end_time != group.end_time
            {
                out.push(Violation::new(
                    ViolationType::GroupMismatch,
                    &group.group_id,
                    format!(
                        "Group '{}' mixes {} {} {}-{} with {} {} {}-{}",
                        group.group_id,
                        group.course_id,
                        group.date,
                        group.start_time,
                        group.end_time,
                        a.course_id,
                        a.date,
                        a.start_time,
                        a.end_time
                    ),
                ));
            }
        }
    }

    let mut groups_per_course: HashMap<&str, usize> = HashMap::new();
    for group in groups {
        *groups_per_course.entry(group.course_id.as_str()).or_insert(0) += 1;
    }
    for group in groups {
        if groups_per_course[group.course_id.as_str()] > 1 {
            out.push(Violation::new(
                ViolationType::GroupMismatch,
                &group.course_id,
                format!("Course '{}' has more than one exam group", group.course_id),
            ));
            groups_per_course.insert(group.course_id.as_str(), 0);
        }
    }
}

fn check_room_conflicts(result: &ScheduleResult, out: &mut Vec<Violation>) {
    let assignments = &result.assignments;
    for (i, a) in assignments.iter().enumerate() {
        for b in &assignments[i + 1..] {
            if a.classroom_id == b.classroom_id && a.overlaps(b.date, b.start_time, b.end_time) {
                out.push(Violation::new(
                    ViolationType::RoomConflict,
                    &a.classroom_id,
                    format!(
                        "Classroom '{}' hosts {} and {} at the same time on {}",
                        a.classroom_id, a.course_id, b.course_id, a.date
                    ),
                ));
            }
        }
    }
}

fn check_student_conflicts(input: &ScheduleInput, groups: &[ExamGroup], out: &mut Vec<Violation>) {
    let enrollments = EnrollmentIndex::new(&input.enrollments);
    for (i, a) in groups.iter().enumerate() {
        for b in &groups[i + 1..] {
            if a.course_id == b.course_id {
                continue;
            }
            let concurrent = a.date == b.date
                && intervals_overlap(a.start_time, a.end_time, b.start_time, b.end_time);
            if concurrent && enrollments.shares_students(&a.course_id, &b.course_id) {
                out.push(Violation::new(
                    ViolationType::StudentConflict,
                    &a.course_id,
                    format!(
                        "Courses {} and {} share students and overlap on {}",
                        a.course_id, b.course_id, a.date
                    ),
                ));
            }
        }
    }
}

fn check_capacity(input: &ScheduleInput, groups: &[ExamGroup], out: &mut Vec<Violation>) {
    let capacity: HashMap<&str, u32> = input
        .classrooms
        .iter()
        .map(|r| (r.id.as_str(), r.capacity))
        .collect();
    for group in groups {
        let Some(course) = input.courses.iter().find(|c| c.id == group.course_id) else {
            continue;
        };
        let seats: u32 = group
            .classroom_ids
            .iter()
            .map(|id| capacity.get(id.as_str()).copied().unwrap_or(0))
            .sum();
        if seats < course.student_count {
            out.push(Violation::new(
                ViolationType::CapacityShortfall,
                &course.id,
                format!(
                    "Course '{}' seats {} of {} students",
                    course.id, seats, course.student_count
                ),
            ));
        }
    }
}

fn check_availability(input: &ScheduleInput, groups: &[ExamGroup], out: &mut Vec<Violation>) {
    let checker = AvailabilityChecker::new(&input.availability);
    for group in groups {
        let Some(course) = input.courses.iter().find(|c| c.id == group.course_id) else {
            continue;
        };
        if !checker.is_available(&course.instructor, group.date, group.start_time, group.end_time)
        {
            out.push(Violation::new(
                ViolationType::InstructorUnavailable,
                &course.id,
                format!(
                    "Instructor '{}' is not available for {} on {} {}-{}",
                    course.instructor, course.id, group.date, group.start_time, group.end_time
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AvailabilityWindow, Classroom, Course, Enrollment, ExamAssignment, ProximityEdge,
    };
    use chrono::{NaiveDate, NaiveTime};

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_input() -> ScheduleInput {
        ScheduleInput::new(
            vec![
                Course::new("C1").with_students(80).with_instructor("I1"),
                Course::new("C2").with_students(40).with_instructor("I2"),
            ],
            vec![Classroom::new("R1", 50), Classroom::new("R2", 50)],
        )
        .with_enrollments(vec![
            Enrollment::new("C1", "s1"),
            Enrollment::new("C2", "s1"),
        ])
        .with_proximity(vec![ProximityEdge::new("R1", "R2", 0.1)])
        .with_availability(vec![AvailabilityWindow::available(
            "I2",
            d(),
            t(10, 0),
            t(12, 0),
        )])
    }

    fn result_of(assignments: Vec<ExamAssignment>) -> ScheduleResult {
        ScheduleResult {
            success: true,
            assignments,
            ..ScheduleResult::default()
        }
    }

    fn kinds(violations: &[Violation]) -> Vec<ViolationType> {
        violations.iter().map(|v| v.violation_type.clone()).collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_input()).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let input = ScheduleInput::new(
            vec![Course::new("C1"), Course::new("C1")],
            vec![Classroom::new("R1", 10), Classroom::new("R1", 20)],
        );
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
                .count(),
            2
        );
        assert!(errors.iter().any(|e| e.message.contains("classroom")));
    }

    #[test]
    fn test_zero_capacity_and_duration() {
        let input = ScheduleInput::new(
            vec![Course::new("C1").with_duration(0)],
            vec![Classroom::new("R1", 0)],
        );
        let errors = validate_input(&input).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidCapacity));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidDuration));
    }

    #[test]
    fn test_zero_duration_without_exam_is_fine() {
        let input = ScheduleInput::new(
            vec![Course::new("C1").with_duration(0).without_exam()],
            vec![Classroom::new("R1", 10)],
        );
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn test_bad_proximity_edges() {
        let input = ScheduleInput::new(vec![], vec![Classroom::new("R1", 10)]).with_proximity(
            vec![
                ProximityEdge::new("R1", "GHOST", 0.2),
                ProximityEdge::new("R1", "R1", 1.0),
            ],
        );
        let errors = validate_input(&input).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownClassroom && e.message.contains("GHOST")));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidDistance));
    }

    #[test]
    fn test_inverted_window() {
        let input = ScheduleInput::default().with_availability(vec![
            AvailabilityWindow::available("I1", d(), t(12, 0), t(10, 0)),
        ]);
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidWindow);
        assert_eq!(errors[0].to_string(), errors[0].message);
    }

    #[test]
    fn test_verify_valid_schedule() {
        let result = result_of(vec![
            ExamAssignment::new("C1", "R1", d(), t(8, 0), t(9, 0), "g1"),
            ExamAssignment::new("C1", "R2", d(), t(8, 0), t(9, 0), "g1"),
            ExamAssignment::new("C2", "R1", d(), t(10, 0), t(11, 0), "g2"),
        ]);
        assert!(verify_schedule(&result, &sample_input()).is_empty());
    }

    #[test]
    fn test_verify_room_conflict() {
        let input = sample_input().with_enrollments(vec![]);
        let result = result_of(vec![
            ExamAssignment::new("C1", "R1", d(), t(10, 0), t(11, 0), "g1"),
            ExamAssignment::new("C1", "R2", d(), t(10, 0), t(11, 0), "g1"),
            ExamAssignment::new("C2", "R1", d(), t(10, 30), t(11, 30), "g2"),
        ]);
        assert_eq!(
            kinds(&verify_schedule(&result, &input)),
            vec![ViolationType::RoomConflict]
        );
    }

    #[test]
    fn test_verify_student_conflict() {
        let mut input = sample_input();
        input.classrooms = vec![Classroom::new("R1", 100), Classroom::new("R3", 100)];
        input.availability.clear();
        let result = result_of(vec![
            ExamAssignment::new("C1", "R1", d(), t(10, 0), t(11, 0), "g1"),
            ExamAssignment::new("C2", "R3", d(), t(10, 0), t(11, 0), "g2"),
        ]);
        assert_eq!(
            kinds(&verify_schedule(&result, &input)),
            vec![ViolationType::StudentConflict]
        );
    }

    #[test]
    fn test_verify_capacity_shortfall() {
        let result = result_of(vec![
            ExamAssignment::new("C1", "R1", d(), t(8, 0), t(9, 0), "g1"),
        ]);
        let violations = verify_schedule(&result, &sample_input());
        assert_eq!(kinds(&violations), vec![ViolationType::CapacityShortfall]);
        assert_eq!(violations[0].entity_id, "C1");
    }

    #[test]
    fn test_verify_instructor_unavailable() {
        let result = result_of(vec![
            ExamAssignment::new("C2", "R1", d(), t(8, 0), t(9, 0), "g2"),
        ]);
        assert_eq!(
            kinds(&verify_schedule(&result, &sample_input())),
            vec![ViolationType::InstructorUnavailable]
        );
    }

    #[test]
    fn test_verify_covering_window_beats_unavailable_one() {
        let input = sample_input().with_availability(vec![
            AvailabilityWindow::available("I2", d(), t(8, 0), t(17, 0)),
            AvailabilityWindow::unavailable("I2", d(), t(12, 0), t(13, 0)),
        ]);
        let result = result_of(vec![
            ExamAssignment::new("C2", "R1", d(), t(11, 30), t(12, 30), "g2"),
        ]);
        assert!(verify_schedule(&result, &input).is_empty());
    }

    #[test]
    fn test_verify_group_mismatch() {
        let result = result_of(vec![
            ExamAssignment::new("C1", "R1", d(), t(8, 0), t(9, 0), "g1"),
            ExamAssignment::new("C1", "R2", d(), t(8, 30), t(9, 30), "g1"),
        ]);
        let violations = verify_schedule(&result, &sample_input());
        assert!(kinds(&violations).contains(&ViolationType::GroupMismatch));
    }

    #[test]
    fn test_verify_split_course() {
        let result = result_of(vec![
            ExamAssignment::new("C1", "R1", d(), t(8, 0), t(9, 0), "g1"),
            ExamAssignment::new("C1", "R2", d(), t(13, 0), t(14, 0), "g9"),
        ]);
        let violations = verify_schedule(&result, &sample_input());
        let mismatches: Vec<_> = violations
            .iter()
            .filter(|v| v.violation_type == ViolationType::GroupMismatch)
            .collect();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].entity_id, "C1");
    }
}
