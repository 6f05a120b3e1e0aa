//! Backtracking exam search.
//!
//! # Algorithm
//!
//! 1. Keep courses needing an exam, largest first (stable on ties).
//! 2. For course `i`, walk days in order, then slots in generation order.
//! 3. For each (date, start): compute the end time, check the working-hours
//!    ceiling and instructor availability, collect rooms free for the span,
//!    and ask the room selector for a combination.
//! 4. Reject the span if a shared student sits an overlapping exam,
//!    otherwise build one assignment per room under a fresh group id.
//! 5. Commit, recurse on `i + 1`. On a dead end, pop exactly the rooms just
//!    committed and try the next slot.
//!
//! A course whose slots are all exhausted fails its branch; the caller
//! resumes with its own next candidate.
//!
//! # Complexity
//! Exponential in the worst case; bounded by `SearchConfig::max_attempts`.

use chrono::{Days, NaiveDate, NaiveTime};
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use super::{ConfigError, SearchConfig, TimeSlotGenerator};
use crate::constraints::{AvailabilityChecker, ConflictChecker, EnrollmentIndex};
use crate::models::{
    AvailabilityWindow, Classroom, Course, Enrollment, ExamAssignment, ProximityEdge,
    ScheduleResult, ScheduleStatistics,
};
use crate::rooms::{ProximityIndex, RoomCombinationSelector};
use crate::validation::validate_input;

const GROUP_ID_LEN: usize = 8;

/// Read-only input snapshot for one scheduling run.
#[derive(Debug, Clone, Default)]
pub struct ScheduleInput {
    /// Courses; those with `has_exam == false` are ignored.
    pub courses: Vec<Course>,
    /// Classrooms; those with `exam_allowed == false` are ignored.
    pub classrooms: Vec<Classroom>,
    /// Student enrollments (may be empty).
    pub enrollments: Vec<Enrollment>,
    /// Room proximity edges (may be empty).
    pub proximity: Vec<ProximityEdge>,
    /// Instructor availability windows (may be empty).
    pub availability: Vec<AvailabilityWindow>,
}

impl ScheduleInput {
    /// Creates an input with courses and classrooms only.
    pub fn new(courses: Vec<Course>, classrooms: Vec<Classroom>) -> Self {
        Self {
            courses,
            classrooms,
            ..Self::default()
        }
    }

    /// Sets enrollment records.
    pub fn with_enrollments(mut self, enrollments: Vec<Enrollment>) -> Self {
        self.enrollments = enrollments;
        self
    }

    /// Sets proximity edges.
    pub fn with_proximity(mut self, proximity: Vec<ProximityEdge>) -> Self {
        self.proximity = proximity;
        self
    }

    /// Sets availability windows.
    pub fn with_availability(mut self, availability: Vec<AvailabilityWindow>) -> Self {
        self.availability = availability;
        self
    }
}

/// Exam timetabling engine.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use exam_schedule::models::{Classroom, Course};
/// use exam_schedule::scheduler::{ExamScheduler, ScheduleInput, SearchConfig};
///
/// let input = ScheduleInput::new(
///     vec![Course::new("C1").with_name("Algorithms").with_students(50).with_duration(90)],
///     vec![Classroom::new("R1", 60), Classroom::new("R2", 200)],
/// );
/// let config = SearchConfig::new().starting_on(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
///
/// let scheduler = ExamScheduler::new(config).unwrap();
/// let result = scheduler.schedule(&input);
/// assert!(result.success);
/// assert_eq!(result.assignments[0].classroom_id, "R1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExamScheduler {
    config: SearchConfig,
}

/// Lookups shared by every level of the search, built once per run.
struct SearchContext<'a> {
    courses: Vec<&'a Course>,
    classrooms: Vec<&'a Classroom>,
    dates: Vec<NaiveDate>,
    slots: Vec<NaiveTime>,
    slot_generator: TimeSlotGenerator,
    availability: AvailabilityChecker,
    conflicts: ConflictChecker,
    selector: RoomCombinationSelector<'a>,
}

/// Outcome of one level of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Solved,
    DeadEnd,
    Aborted,
}

/// Mutable search state, owned by the single in-progress run.
struct SearchState {
    committed: Vec<ExamAssignment>,
    best: Vec<ExamAssignment>,
    best_depth: usize,
    dead_ends: HashMap<String, u32>,
    attempts: u64,
    backtracks: u64,
    max_attempts: Option<u64>,
    budget_exhausted: bool,
    rng: StdRng,
    issued_ids: HashSet<String>,
}

impl ExamScheduler {
    /// Creates a scheduler after validating the configuration.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Builds the per-run lookups for already ordered courses.
    fn context<'a>(
        &self,
        courses: Vec<&'a Course>,
        input: &'a ScheduleInput,
        proximity: &'a ProximityIndex,
    ) -> SearchContext<'a> {
        let classrooms: Vec<&Classroom> = input
            .classrooms
            .iter()
            .filter(|r| r.exam_allowed)
            .collect();

        let start_date = self.config.resolved_start_date();
        let dates: Vec<NaiveDate> = (0..self.config.days)
            .filter_map(|offset| start_date.checked_add_days(Days::new(u64::from(offset))))
            .collect();
        let slot_generator = self.config.time_slots();

        SearchContext {
            courses,
            classrooms,
            dates,
            slots: slot_generator.generate(),
            slot_generator,
            availability: AvailabilityChecker::new(&input.availability),
            conflicts: ConflictChecker::new(EnrollmentIndex::new(&input.enrollments)),
            selector: RoomCombinationSelector::new(proximity),
        }
    }

    /// Runs the search.
    ///
    /// Never fails: infeasibility is reported through
    /// `ScheduleResult::success` and `statistics.failed_courses`.
    pub fn schedule(&self, input: &ScheduleInput) -> ScheduleResult {
        if let Err(issues) = validate_input(input) {
            for issue in &issues {
                warn!(kind = ?issue.kind, "{}", issue.message);
            }
        }

        let mut courses: Vec<&Course> = input.courses.iter().filter(|c| c.has_exam).collect();
        if courses.is_empty() {
            info!("no courses require an exam");
            return ScheduleResult::failure("No courses require an exam.");
        }
        courses.sort_by(|a, b| b.student_count.cmp(&a.student_count));

        let proximity = ProximityIndex::new(&input.proximity);
        let ctx = self.context(courses, input, &proximity);

        info!(
            courses = ctx.courses.len(),
            classrooms = ctx.classrooms.len(),
            days = ctx.dates.len(),
            slots_per_day = ctx.slots.len(),
            courses_with_enrollments = ctx.conflicts.enrollments().course_count(),
            instructors_with_windows = ctx.availability.instructor_count(),
            rooms_with_neighbours = proximity.room_count(),
            first_day = ?ctx.dates.first(),
            "starting exam search"
        );

        let mut state = SearchState::new(&self.config);
        let outcome = state.place(&ctx, 0);
        let result = state.into_result(&ctx, outcome);

        if result.success {
            info!(
                assignments = result.assignment_count(),
                attempts = result.statistics.attempts,
                backtracks = result.statistics.backtracks,
                "exam search succeeded"
            );
        } else {
            warn!(
                scheduled = result.statistics.scheduled_courses,
                total = result.statistics.total_courses,
                failed = ?result.statistics.failed_courses,
                budget_exhausted = result.statistics.budget_exhausted,
                "exam search incomplete"
            );
        }
        result
    }
}

impl SearchState {
    fn new(config: &SearchConfig) -> Self {
        Self {
            committed: Vec::new(),
            best: Vec::new(),
            best_depth: 0,
            dead_ends: HashMap::new(),
            attempts: 0,
            backtracks: 0,
            max_attempts: config.max_attempts,
            budget_exhausted: false,
            rng: StdRng::seed_from_u64(config.group_id_seed),
            issued_ids: HashSet::new(),
        }
    }

    /// Places course `index` and everything after it.
    fn place(&mut self, ctx: &SearchContext<'_>, index: usize) -> Branch {
        let Some(&course) = ctx.courses.get(index) else {
            return Branch::Solved;
        };
        debug!(
            course = %course.id,
            students = course.student_count,
            duration = course.exam_duration_minutes,
            depth = index,
            "placing course"
        );

        for &date in &ctx.dates {
            for &start in &ctx.slots {
                if self.budget_spent() {
                    self.budget_exhausted = true;
                    return Branch::Aborted;
                }
                self.attempts += 1;

                let Some(end) = ctx.slot_generator.end_for(start, course.exam_duration_minutes)
                else {
                    continue;
                };
                if !ctx
                    .availability
                    .is_available(&course.instructor, date, start, end)
                {
                    continue;
                }

                let free: Vec<&Classroom> = ctx
                    .classrooms
                    .iter()
                    .copied()
                    .filter(|room| {
                        !ConflictChecker::room_conflict(&self.committed, &room.id, date, start, end)
                    })
                    .collect();
                if free.is_empty() {
                    continue;
                }
                let Some(selection) = ctx.selector.select(course, &free) else {
                    continue;
                };

                if ctx
                    .conflicts
                    .student_conflict(&self.committed, &course.id, date, start, end)
                {
                    continue;
                }

                let group_id = self.next_group_id();
                let added = selection.rooms.len();
                self.committed.extend(selection.rooms.iter().map(|room| {
                    ExamAssignment::new(&course.id, &room.id, date, start, end, group_id.as_str())
                }));
                self.record_depth(index + 1);

                match self.place(ctx, index + 1) {
                    Branch::Solved => return Branch::Solved,
                    Branch::Aborted => return Branch::Aborted,
                    Branch::DeadEnd => {
                        self.committed.truncate(self.committed.len() - added);
                        self.issued_ids.remove(&group_id);
                        self.backtracks += 1;
                        debug!(course = %course.id, %date, %start, "backtracking");
                    }
                }
            }
        }

        *self.dead_ends.entry(course.id.clone()).or_insert(0) += 1;
        debug!(
            course = %course.id,
            dead_ends = self.dead_ends[&course.id],
            "no slot left for course"
        );
        Branch::DeadEnd
    }

    fn budget_spent(&self) -> bool {
        self.max_attempts
            .is_some_and(|limit| self.attempts >= limit)
    }

    /// Snapshots the deepest partial placement seen so far.
    fn record_depth(&mut self, depth: usize) {
        if depth > self.best_depth {
            self.best_depth = depth;
            self.best = self.committed.clone();
        }
    }

    /// Draws a group id not held by any committed exam.
    fn next_group_id(&mut self) -> String {
        loop {
            let id: String = (&mut self.rng)
                .sample_iter(Alphanumeric)
                .take(GROUP_ID_LEN)
                .map(char::from)
                .collect();
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
        }
    }

    fn into_result(self, ctx: &SearchContext<'_>, outcome: Branch) -> ScheduleResult {
        let success = outcome == Branch::Solved;
        let total = ctx.courses.len();
        let assignments = if success { self.committed } else { self.best };

        let placed: HashSet<&str> = assignments.iter().map(|a| a.course_id.as_str()).collect();
        let failed_courses: Vec<String> = if success {
            Vec::new()
        } else {
            ctx.courses
                .iter()
                .filter(|c| !placed.contains(c.id.as_str()))
                .map(|c| c.label().to_string())
                .collect()
        };
        let scheduled = placed.len();

        let message = if success {
            format!(
                "All {total} courses scheduled with {} room assignments.",
                assignments.len()
            )
        } else if self.budget_exhausted {
            format!(
                "Search stopped after {} attempts; {scheduled}/{total} courses placed.",
                self.attempts
            )
        } else {
            format!(
                "Partial schedule: {scheduled}/{total} courses placed; {} could not be placed.",
                failed_courses.len()
            )
        };

        let mut result = ScheduleResult {
            success,
            message,
            statistics: ScheduleStatistics {
                total_courses: total,
                scheduled_courses: scheduled,
                failed_courses,
                total_classrooms_used: 0,
                attempts: self.attempts,
                backtracks: self.backtracks,
                budget_exhausted: self.budget_exhausted,
            },
            assignments,
        };
        result.statistics.total_classrooms_used = result.classrooms_used().len();
        result
    }
}
