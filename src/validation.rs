//! Post-hoc validation of generated timetables.
//!
//! Checks a timetable against the catalog it was generated for. Detects:
//! - Double-booked cells (two non-break sessions in one day × slot)
//! - Sessions whose slot duration does not match their kind
//! - Sessions overlapping the day's lunch interval
//! - Non-break sessions in the fixed-break slot
//! - Missing, duplicated or misplaced break entries
//!
//! The generator upholds all of these by construction; the validator is
//! for timetables that were edited, deserialized or produced elsewhere.

use crate::catalog::SlotCatalog;
use crate::models::{hours_to_minutes, Day, GroupTimetable, SchedulingGroup, Timetable};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<TimetableViolation>>;

/// A violated timetable invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{group}: {message}")]
pub struct TimetableViolation {
    /// Violation category.
    pub kind: ViolationKind,
    /// Group the violation was found in.
    pub group: SchedulingGroup,
    /// Human-readable description.
    pub message: String,
}

/// Categories of timetable violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Two non-break sessions share a day × slot cell.
    DoubleBooking,
    /// Slot duration differs from the session kind's duration.
    DurationMismatch,
    /// Session overlaps the day's lunch interval.
    LunchOverlap,
    /// A non-break session sits in the fixed-break slot.
    BreakSlotUsed,
    /// A day has zero or several breaks, or a break is off the break slot.
    BreakIntegrity,
    /// A session references a slot or day outside the catalog, or a slot
    /// whose times cannot be parsed.
    UnknownSlot,
}

impl TimetableViolation {
    fn new(kind: ViolationKind, group: &SchedulingGroup, message: impl Into<String>) -> Self {
        Self {
            kind,
            group: group.clone(),
            message: message.into(),
        }
    }
}

/// Validates every group of a timetable.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(violations)` with all detected issues.
pub fn validate_timetable(timetable: &Timetable, catalog: &SlotCatalog) -> ValidationResult {
    let violations: Vec<TimetableViolation> = timetable
        .iter()
        .flat_map(|grid| validate_group(grid, catalog))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Validates one group's grid.
pub fn validate_group(grid: &GroupTimetable, catalog: &SlotCatalog) -> Vec<TimetableViolation> {
    let group = &grid.group;
    let checker = catalog.checker();
    let mut violations = Vec::new();
    let mut cells = HashSet::new();
    let mut breaks: HashMap<Day, usize> = HashMap::new();

    for s in &grid.sessions {
        let where_ = format!("{} {} {}", s.course_code, s.day, s.slot);

        if catalog.day_position(s.day).is_none() || catalog.slot(s.slot_index) != Some(&s.slot) {
            violations.push(TimetableViolation::new(
                ViolationKind::UnknownSlot,
                group,
                format!("{where_}: slot {} is not in the catalog", s.slot_index),
            ));
            continue;
        }

        if s.is_break() {
            *breaks.entry(s.day).or_insert(0) += 1;
            if s.slot_index != catalog.break_index() {
                violations.push(TimetableViolation::new(
                    ViolationKind::BreakIntegrity,
                    group,
                    format!("{where_}: break outside the fixed-break slot"),
                ));
            }
            continue;
        }

        if !cells.insert((s.day, s.slot_index)) {
            violations.push(TimetableViolation::new(
                ViolationKind::DoubleBooking,
                group,
                format!("{where_}: cell already occupied"),
            ));
        }

        if s.slot_index == catalog.break_index() || checker.is_fixed_break(&s.slot) {
            violations.push(TimetableViolation::new(
                ViolationKind::BreakSlotUsed,
                group,
                format!("{where_}: session in the fixed-break slot"),
            ));
        }

        let checked = (
            checker.duration(&s.slot),
            checker.overlaps_lunch(s.day, &s.slot),
        );
        let (duration, lunch) = match checked {
            (Ok(d), Ok(l)) => (d, l),
            (Err(e), _) | (_, Err(e)) => {
                violations.push(TimetableViolation::new(
                    ViolationKind::UnknownSlot,
                    group,
                    format!("{where_}: {e}"),
                ));
                continue;
            }
        };

        if let Some(hours) = s.kind.required_hours() {
            if duration.num_minutes() != hours_to_minutes(hours) {
                violations.push(TimetableViolation::new(
                    ViolationKind::DurationMismatch,
                    group,
                    format!(
                        "{where_}: {} needs {} minutes, slot has {}",
                        s.kind,
                        hours_to_minutes(hours),
                        duration.num_minutes()
                    ),
                ));
            }
        }

        if lunch {
            violations.push(TimetableViolation::new(
                ViolationKind::LunchOverlap,
                group,
                format!("{where_}: overlaps lunch"),
            ));
        }
    }

    for &day in catalog.days() {
        let n = breaks.get(&day).copied().unwrap_or(0);
        if n != 1 {
            violations.push(TimetableViolation::new(
                ViolationKind::BreakIntegrity,
                group,
                format!("{day}: expected 1 break, found {n}"),
            ));
        }
    }

    violations
}
