//! Exam timetable quality metrics (KPIs).
//!
//! Computes seat and room indicators from a schedule result and its
//! input courses and classrooms.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Seats required | Sum of student counts over placed courses |
//! | Seats offered | Sum of room capacities over all assignments |
//! | Wasted seats | Seats offered minus seats required |
//! | Avg seat utilization | Mean of students / offered seats per exam |
//! | Multi-room exams | Exams spread over two or more rooms |
//! | Exam days | Distinct dates carrying at least one exam |

use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

use crate::models::{Classroom, Course, ScheduleResult};

/// Exam timetable performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Number of exam instances (groups).
    pub exam_count: usize,
    /// Students seated across all placed exams.
    pub seats_required: u64,
    /// Room capacity allocated across all placed exams.
    pub seats_offered: u64,
    /// `seats_offered - seats_required`.
    pub wasted_seats: u64,
    /// Mean per-exam ratio of students to allocated seats (0.0..1.0).
    pub avg_seat_utilization: f64,
    /// Exams using more than one room.
    pub multi_room_exams: usize,
    /// Distinct exam dates, earliest first.
    pub exam_days: Vec<NaiveDate>,
    /// Number of exams hosted per classroom.
    pub exams_by_classroom: HashMap<String, usize>,
}

impl ScheduleKpi {
    /// Computes KPIs from a result and its input data.
    ///
    /// Assignments naming unknown courses or classrooms contribute zero
    /// students or seats.
    pub fn calculate(result: &ScheduleResult, courses: &[Course], classrooms: &[Classroom]) -> Self {
        let students: HashMap<&str, u32> = courses
            .iter()
            .map(|c| (c.id.as_str(), c.student_count))
            .collect();
        let capacity: HashMap<&str, u32> = classrooms
            .iter()
            .map(|r| (r.id.as_str(), r.capacity))
            .collect();

        let groups = result.exam_groups();
        let mut seats_required: u64 = 0;
        let mut seats_offered: u64 = 0;
        let mut utilization_sum = 0.0;
        let mut multi_room_exams = 0;
        let mut exam_days = BTreeSet::new();
        let mut exams_by_classroom: HashMap<String, usize> = HashMap::new();

        for group in &groups {
            let required = u64::from(students.get(group.course_id.as_str()).copied().unwrap_or(0));
            let offered: u64 = group
                .classroom_ids
                .iter()
                .map(|id| u64::from(capacity.get(id.as_str()).copied().unwrap_or(0)))
                .sum();

            seats_required += required;
            seats_offered += offered;
            if offered > 0 {
                utilization_sum += (required as f64 / offered as f64).min(1.0);
            }
            if group.classroom_ids.len() > 1 {
                multi_room_exams += 1;
            }
            exam_days.insert(group.date);
            for id in &group.classroom_ids {
                *exams_by_classroom.entry(id.clone()).or_insert(0) += 1;
            }
        }

        let avg_seat_utilization = if groups.is_empty() {
            0.0
        } else {
            utilization_sum / groups.len() as f64
        };

        Self {
            exam_count: groups.len(),
            seats_required,
            seats_offered,
            wasted_seats: seats_offered.saturating_sub(seats_required),
            avg_seat_utilization,
            multi_room_exams,
            exam_days: exam_days.into_iter().collect(),
            exams_by_classroom,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_wasted_seats: u64, min_utilization: f64) -> bool {
        self.wasted_seats <= max_wasted_seats && self.avg_seat_utilization >= min_utilization
    }
}
