//! Timetable generation pipeline.
//!
//! # Algorithm
//!
//! 1. For each course, in input order, resolve its scheduling group.
//! 2. Derive the requirement from the credit specification: L lectures of
//!    1.0h and round(P/2) practicals of 1.5h. A malformed specification
//!    yields no sessions and a warning.
//! 3. Allocate lectures, then practicals.
//! 4. Record the course details, whatever the allocation outcome.
//! 5. Append one break per group per day at the fixed-break slot.
//!
//! Groups never share state. They are the natural unit for parallel
//! generation; this pipeline runs them sequentially on one thread.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use tracing::{info, warn};

use super::{AllocationResult, Allocator, DaySelector, GenerationContext, ScheduleWarning};
use crate::catalog::SlotCatalog;
use crate::models::{
    Course, CourseDetail, CreditSpec, CreditSpecError, ScheduledSession, SchedulingGroup,
    SessionKind, Timetable,
};

/// Per-call allocation outcome, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    /// Group the sessions belong to.
    pub group: SchedulingGroup,
    /// Course code.
    pub course: String,
    /// Kind of session requested.
    pub kind: SessionKind,
    /// Placement result.
    pub result: AllocationResult,
}

/// Everything a generation run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Final timetable with per-group course details.
    pub timetable: Timetable,
    /// One record per allocation call, in call order.
    pub allocations: Vec<AllocationRecord>,
    /// Accumulated warnings.
    pub warnings: Vec<ScheduleWarning>,
}

impl GenerationOutcome {
    /// Whether every requested session was placed.
    pub fn is_complete(&self) -> bool {
        self.allocations.iter().all(|a| a.result.is_complete())
    }

    /// Total sessions requested across all calls.
    pub fn requested(&self) -> u32 {
        self.allocations.iter().map(|a| a.result.requested).sum()
    }

    /// Total sessions placed across all calls.
    pub fn placed(&self) -> u32 {
        self.allocations.iter().map(|a| a.result.placed).sum()
    }
}

/// Number of (lecture, practical) sessions a credit specification requires.
///
/// # Example
/// ```
/// use u_timetable::scheduler::session_requirements;
///
/// assert_eq!(session_requirements("3-0-4-0-7"), Ok((3, 2)));
/// assert!(session_requirements("bad-data").is_err());
/// ```
pub fn session_requirements(spec: &str) -> Result<(u32, u32), CreditSpecError> {
    let spec: CreditSpec = spec.parse()?;
    Ok((spec.lecture_sessions(), spec.practical_sessions()))
}

/// Drives the allocator over a list of courses.
///
/// # Example
///
/// ```
/// use u_timetable::catalog::SlotCatalog;
/// use u_timetable::models::{Course, SchedulingGroup, SessionKind};
/// use u_timetable::scheduler::{RandomDays, TimetablePipeline};
///
/// let catalog = SlotCatalog::reference();
/// let courses = vec![
///     Course::new("cse_a", "1", "CS101").with_credit_spec("3-0-2-0-4"),
/// ];
///
/// let pipeline = TimetablePipeline::new(&catalog);
/// let outcome = pipeline.generate(&courses, &mut RandomDays::seeded(7));
///
/// let grid = outcome.timetable.group(&SchedulingGroup::new("cse_a", "1")).unwrap();
/// assert_eq!(grid.count_kind(SessionKind::Lecture), 3);
/// assert_eq!(grid.count_kind(SessionKind::Practical), 1);
/// assert_eq!(grid.count_kind(SessionKind::Break), 5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimetablePipeline<'a> {
    catalog: &'a SlotCatalog,
    allocator: Allocator<'a>,
}

impl<'a> TimetablePipeline<'a> {
    /// Creates a pipeline over a catalog.
    pub fn new(catalog: &'a SlotCatalog) -> Self {
        Self {
            catalog,
            allocator: Allocator::new(catalog),
        }
    }

    /// Overrides the allocator's retry budget.
    pub fn with_max_retries(mut self, max_retries: NonZeroU32) -> Self {
        self.allocator = self.allocator.with_max_retries(max_retries);
        self
    }

    /// Generates a timetable in a fresh context.
    pub fn generate<S: DaySelector + ?Sized>(
        &self,
        courses: &[Course],
        selector: &mut S,
    ) -> GenerationOutcome {
        let mut ctx = GenerationContext::new(self.catalog);
        let allocations = self.run(&mut ctx, courses, selector);

        info!(
            courses = courses.len(),
            groups = ctx.timetable.group_count(),
            sessions = ctx.timetable.session_count(),
            warnings = ctx.warnings.len(),
            "Timetable generated"
        );

        GenerationOutcome {
            timetable: ctx.timetable,
            allocations,
            warnings: ctx.warnings,
        }
    }

    /// Schedules all courses into `ctx`, then adds the breaks.
    pub fn run<S: DaySelector + ?Sized>(
        &self,
        ctx: &mut GenerationContext,
        courses: &[Course],
        selector: &mut S,
    ) -> Vec<AllocationRecord> {
        let mut records = Vec::with_capacity(courses.len() * 2);
        for course in courses {
            records.extend(self.schedule_course(ctx, course, selector));
        }
        self.add_breaks(ctx);
        records
    }

    /// Schedules one course: lectures, then practicals, then its details.
    pub fn schedule_course<S: DaySelector + ?Sized>(
        &self,
        ctx: &mut GenerationContext,
        course: &Course,
        selector: &mut S,
    ) -> Vec<AllocationRecord> {
        let group = course.group();
        ctx.ensure_group(&group);

        let (lectures, practicals) = match session_requirements(&course.credit_spec) {
            Ok(counts) => counts,
            Err(_) => {
                warn!(
                    group = %group,
                    course = %course.code,
                    spec = %course.credit_spec,
                    "Malformed credit specification, scheduling no sessions"
                );
                ctx.warn(ScheduleWarning::MalformedCreditSpec {
                    group: group.clone(),
                    course: course.code.clone(),
                    spec: course.credit_spec.clone(),
                });
                (0, 0)
            }
        };

        let mut records = Vec::with_capacity(2);
        for (kind, count) in [
            (SessionKind::Lecture, lectures),
            (SessionKind::Practical, practicals),
        ] {
            let hours = kind.required_hours().unwrap_or_default();
            let result = self
                .allocator
                .allocate(ctx, selector, &group, &course.code, kind, hours, count);
            records.push(AllocationRecord {
                group: group.clone(),
                course: course.code.clone(),
                kind,
                result,
            });
        }

        ctx.timetable
            .group_mut(&group)
            .courses
            .push(CourseDetail::from(course));

        records
    }

    /// Appends one break per day to every group, regardless of occupancy.
    pub fn add_breaks(&self, ctx: &mut GenerationContext) {
        let index = self.catalog.break_index();
        let slot = self.catalog.fixed_break();
        for grid in ctx.timetable.groups.values_mut() {
            for &day in self.catalog.days() {
                grid.sessions
                    .push(ScheduledSession::fixed_break(day, index, slot.clone()));
            }
        }
    }
}

/// Generates a timetable with a seeded random day selector.
pub fn generate_seeded(catalog: &SlotCatalog, courses: &[Course], seed: u64) -> Timetable {
    TimetablePipeline::new(catalog)
        .generate(courses, &mut super::RandomDays::seeded(seed))
        .timetable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSettings;
    use crate::models::Day;
    use crate::scheduler::{RandomDays, ScriptedDays};
    use crate::validation::validate_timetable;
    use std::collections::HashSet;

    fn course(branch: &str, sem: &str, code: &str, spec: &str) -> Course {
        Course::new(branch, sem, code)
            .with_name(format!("{code} name"))
            .with_credit_spec(spec)
            .with_faculty("Dr. X")
    }

    fn generate(cat: &SlotCatalog, courses: &[Course], seed: u64) -> GenerationOutcome {
        TimetablePipeline::new(cat).generate(courses, &mut RandomDays::seeded(seed))
    }

    fn sample_courses() -> Vec<Course> {
        vec![
            course("cse_a", "1", "CS101", "3-0-2-0-4"),
            course("cse_a", "1", "MA101", "3-1-0-0-4"),
            course("cse_a", "1", "PH101", "2-0-4-0-4"),
            course("cse_a", "3", "CS201", "3-0-4-0-7"),
            course("ece", "3", "EC201", "3-0-2-0-4"),
            course("ece", "3", "EC202", "2-1-2-0-3"),
        ]
    }

    #[test]
    fn test_requirement_derivation() {
        assert_eq!(session_requirements("3-0-4-0-7"), Ok((3, 2)));
        assert_eq!(session_requirements("0-0-3-0-2"), Ok((0, 2)));
        assert_eq!(session_requirements("2-0-1-0-2"), Ok((2, 0)));
    }

    #[test]
    fn test_generate_counts() {
        let cat = SlotCatalog::reference();
        let courses = vec![course("cse_a", "3", "CS201", "3-0-4-0-7")];
        let outcome = generate(&cat, &courses, 11);

        let grid = outcome
            .timetable
            .group(&SchedulingGroup::new("cse_a", "3"))
            .unwrap();
        assert_eq!(grid.sessions_for_course("CS201").len(), 5);
        assert_eq!(grid.count_kind(SessionKind::Lecture), 3);
        assert_eq!(grid.count_kind(SessionKind::Practical), 2);
        assert_eq!(outcome.requested(), 5);
        assert_eq!(outcome.placed(), 5);
        assert!(outcome.is_complete());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_invariants_hold() {
        let cat = SlotCatalog::reference();
        let outcome = generate(&cat, &sample_courses(), 2024);

        assert!(validate_timetable(&outcome.timetable, &cat).is_ok());
        for grid in outcome.timetable.iter() {
            let mut cells = HashSet::new();
            for s in grid.sessions.iter().filter(|s| !s.is_break()) {
                assert!(cells.insert((s.day, s.slot_index)), "double booking");
                assert_ne!(s.slot_index, cat.break_index());
            }
        }
    }

    #[test]
    fn test_breaks_once_per_day() {
        let cat = SlotCatalog::reference();
        let outcome = generate(&cat, &sample_courses(), 5);

        assert_eq!(outcome.timetable.group_count(), 3);
        for grid in outcome.timetable.iter() {
            let breaks: Vec<_> = grid.sessions.iter().filter(|s| s.is_break()).collect();
            assert_eq!(breaks.len(), 5);
            let days: HashSet<Day> = breaks.iter().map(|s| s.day).collect();
            assert_eq!(days.len(), 5);
            assert!(breaks.iter().all(|s| s.slot_index == 2 && s.course_code == "-"));
        }
    }

    #[test]
    fn test_determinism() {
        let cat = SlotCatalog::reference();
        let a = generate_seeded(&cat, &sample_courses(), 99);
        let b = generate_seeded(&cat, &sample_courses(), 99);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_malformed_spec_resilience() {
        let cat = SlotCatalog::reference();
        let mut courses = sample_courses();
        courses.insert(1, course("cse_a", "1", "BAD1", "bad-data"));

        let outcome = generate(&cat, &courses, 8);
        let grid = outcome
            .timetable
            .group(&SchedulingGroup::new("cse_a", "1"))
            .unwrap();

        assert!(grid.sessions_for_course("BAD1").is_empty());
        assert!(grid.courses.iter().any(|c| c.code == "BAD1"));
        assert_eq!(
            outcome.warnings,
            vec![ScheduleWarning::MalformedCreditSpec {
                group: SchedulingGroup::new("cse_a", "1"),
                course: "BAD1".into(),
                spec: "bad-data".into(),
            }]
        );
        // Other courses still fully scheduled
        assert_eq!(grid.sessions_for_course("CS101").len(), 4);
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_course_details_in_input_order() {
        let cat = SlotCatalog::reference();
        let outcome = generate(&cat, &sample_courses(), 1);
        let grid = outcome
            .timetable
            .group(&SchedulingGroup::new("cse_a", "1"))
            .unwrap();
        let codes: Vec<&str> = grid.courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CS101", "MA101", "PH101"]);
        assert_eq!(grid.courses[0].faculty, vec!["Dr. X"]);
        assert_eq!(grid.courses[0].credit_spec, "3-0-2-0-4");
    }

    #[test]
    fn test_lecture_before_practical_records() {
        let cat = SlotCatalog::reference();
        let courses = vec![course("dsai", "5", "DS501", "2-0-2-0-3")];
        let outcome = generate(&cat, &courses, 3);
        let kinds: Vec<SessionKind> = outcome.allocations.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![SessionKind::Lecture, SessionKind::Practical]);
    }

    #[test]
    fn test_shortfall_continues_with_next_course() {
        // One day, budget 3: Monday holds 2 practicals only
        let cat = CatalogSettings::default()
            .with_days(vec![Day::Monday])
            .with_max_retries(3)
            .build()
            .unwrap();
        let courses = vec![
            course("cse_a", "1", "LAB1", "0-0-6-0-3"),
            course("cse_a", "1", "CS101", "2-0-0-0-2"),
        ];
        let outcome =
            TimetablePipeline::new(&cat).generate(&courses, &mut ScriptedDays::constant(0));

        assert_eq!(outcome.allocations[1].result.placed, 2);
        assert_eq!(outcome.allocations[1].result.requested, 3);
        assert_eq!(outcome.allocations[2].result.placed, 2);
        assert!(!outcome.is_complete());
        assert!(matches!(
            outcome.warnings[0],
            ScheduleWarning::RetryExhausted { unmet: 1, .. }
        ));
    }

    #[test]
    fn test_minimum_retry_budget() {
        let cat = SlotCatalog::reference();
        let courses = vec![course("cse_a", "1", "CS1", "2-0-2-0-3")];
        let outcome = TimetablePipeline::new(&cat)
            .with_max_retries(NonZeroU32::MIN)
            .generate(&courses, &mut RandomDays::seeded(1));

        // Each requirement still gets one attempt
        for record in &outcome.allocations {
            assert_eq!(record.result.attempts, 1);
            assert_eq!(record.result.placed, 1);
        }
        assert_eq!(outcome.allocations.len(), 2);
        assert!(matches!(
            outcome.warnings[..],
            [ScheduleWarning::RetryExhausted { kind: SessionKind::Lecture, unmet: 1, .. }]
        ));
    }

    #[test]
    fn test_breaks_for_groups_without_sessions() {
        let cat = SlotCatalog::reference();
        let courses = vec![course("ece", "7", "EC799", "0-0-0-6-3")];
        let outcome = generate(&cat, &courses, 0);
        let grid = outcome
            .timetable
            .group(&SchedulingGroup::new("ece", "7"))
            .unwrap();
        assert_eq!(grid.sessions.len(), 5);
        assert!(grid.sessions.iter().all(|s| s.is_break()));
    }
}
