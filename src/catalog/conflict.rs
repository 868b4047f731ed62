//! Conflict rules over the slot catalog.
//!
//! Pure functions: no state, no side effects. Malformed time strings are
//! returned as errors, never panics; the caller decides how to report them.

use chrono::TimeDelta;

use super::SlotCatalog;
use crate::models::{Day, Slot, SlotTimeError};

/// Outcome of testing one catalog slot against a placement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// The slot may host the session (occupancy aside).
    Eligible,
    /// The slot is the fixed break.
    FixedBreak,
    /// The slot's duration differs from the required duration.
    DurationMismatch,
    /// The slot overlaps the day's lunch interval.
    LunchConflict,
    /// A time string of the slot or of the day's lunch is malformed.
    Invalid(SlotTimeError),
}

/// Conflict checker bound to a catalog.
#[derive(Debug, Clone, Copy)]
pub struct ConflictChecker<'a> {
    catalog: &'a SlotCatalog,
}

impl<'a> ConflictChecker<'a> {
    /// Creates a checker for a catalog.
    pub fn new(catalog: &'a SlotCatalog) -> Self {
        Self { catalog }
    }

    /// Duration of a slot (end - start).
    pub fn duration(&self, slot: &Slot) -> Result<TimeDelta, SlotTimeError> {
        Ok(slot.resolve()?.duration())
    }

    /// Whether a slot overlaps the lunch interval of `day`.
    ///
    /// Any partial overlap counts. Days without a lunch interval never
    /// conflict.
    pub fn overlaps_lunch(&self, day: Day, slot: &Slot) -> Result<bool, SlotTimeError> {
        let Some(lunch) = self.catalog.lunch(day) else {
            return Ok(false);
        };
        let lunch = lunch.resolve()?;
        Ok(slot.resolve()?.overlaps(&lunch))
    }

    /// Whether a slot equals the configured fixed break.
    pub fn is_fixed_break(&self, slot: &Slot) -> bool {
        *slot == *self.catalog.fixed_break()
    }

    /// Tests the slot at `slot_index` for a session of `required_minutes`
    /// on `day`.
    pub fn evaluate(&self, day: Day, slot_index: usize, required_minutes: i64) -> Candidate {
        let Some(slot) = self.catalog.slot(slot_index) else {
            return Candidate::DurationMismatch;
        };
        if slot_index == self.catalog.break_index() || self.is_fixed_break(slot) {
            return Candidate::FixedBreak;
        }

        let times = match slot.resolve() {
            Ok(times) => times,
            Err(e) => return Candidate::Invalid(e),
        };
        match self.overlaps_lunch(day, slot) {
            Ok(true) => return Candidate::LunchConflict,
            Ok(false) => {}
            Err(e) => return Candidate::Invalid(e),
        }
        if times.duration_minutes() != required_minutes {
            return Candidate::DurationMismatch;
        }

        Candidate::Eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSettings;

    #[test]
    fn test_duration() {
        let cat = SlotCatalog::reference();
        let checker = cat.checker();
        assert_eq!(
            checker.duration(&Slot::new("14:00", "15:30")).unwrap(),
            TimeDelta::minutes(90)
        );
        assert!(checker.duration(&Slot::new("xx", "15:30")).is_err());
    }

    #[test]
    fn test_overlaps_lunch_partial() {
        let cat = SlotCatalog::reference();
        let checker = cat.checker();
        assert!(checker
            .overlaps_lunch(Day::Monday, &Slot::new("12:30", "13:30"))
            .unwrap());
        assert!(checker
            .overlaps_lunch(Day::Monday, &Slot::new("13:30", "14:30"))
            .unwrap());
        assert!(!checker
            .overlaps_lunch(Day::Monday, &Slot::new("12:00", "13:00"))
            .unwrap());
        assert!(!checker
            .overlaps_lunch(Day::Monday, &Slot::new("14:00", "15:00"))
            .unwrap());
        // No lunch configured for Saturday
        assert!(!checker
            .overlaps_lunch(Day::Saturday, &Slot::new("13:00", "14:00"))
            .unwrap());
    }

    #[test]
    fn test_is_fixed_break() {
        let cat = SlotCatalog::reference();
        let checker = cat.checker();
        assert!(checker.is_fixed_break(&Slot::new("10:30", "11:00")));
        assert!(!checker.is_fixed_break(&Slot::new("10:00", "10:30")));
    }

    #[test]
    fn test_evaluate_reference_slots() {
        let cat = SlotCatalog::reference();
        let checker = cat.checker();

        assert_eq!(checker.evaluate(Day::Monday, 0, 60), Candidate::Eligible);
        assert_eq!(checker.evaluate(Day::Monday, 1, 60), Candidate::DurationMismatch);
        assert_eq!(checker.evaluate(Day::Monday, 2, 30), Candidate::FixedBreak);
        assert_eq!(checker.evaluate(Day::Monday, 8, 90), Candidate::Eligible);
        assert_eq!(checker.evaluate(Day::Monday, 8, 60), Candidate::DurationMismatch);
        assert_eq!(checker.evaluate(Day::Monday, 42, 60), Candidate::DurationMismatch);
    }

    #[test]
    fn test_evaluate_lunch_conflict() {
        let cat = CatalogSettings::default()
            .with_lunch(Day::Tuesday, Slot::new("12:30", "13:30"))
            .build()
            .unwrap();
        let checker = cat.checker();
        assert_eq!(checker.evaluate(Day::Tuesday, 4, 60), Candidate::LunchConflict);
        assert_eq!(checker.evaluate(Day::Monday, 4, 60), Candidate::Eligible);
    }

    #[test]
    fn test_evaluate_invalid_times() {
        let mut slots = CatalogSettings::default().slots;
        slots[0] = Slot::new("9 o'clock", "10:00");
        let cat = CatalogSettings::default()
            .with_slots(slots)
            .with_lunch(Day::Friday, Slot::new("lunch", "14:00"))
            .build()
            .unwrap();
        let checker = cat.checker();

        match checker.evaluate(Day::Monday, 0, 60) {
            Candidate::Invalid(e) => assert_eq!(e.value, "9 o'clock"),
            other => panic!("expected invalid slot, got {other:?}"),
        }
        match checker.evaluate(Day::Friday, 3, 60) {
            Candidate::Invalid(e) => assert_eq!(e.value, "lunch"),
            other => panic!("expected invalid lunch, got {other:?}"),
        }
        assert_eq!(checker.evaluate(Day::Monday, 3, 60), Candidate::Eligible);
    }
}
