//! Slot catalog: the static description of the weekly grid.
//!
//! The catalog fixes which days are schedulable, the ordered list of
//! time-of-day slots, which slot is the fixed short break, each day's lunch
//! interval and the allocator's retry budget. It is pure configuration and
//! never changes during a generation run.
//!
//! # Validation
//! Construction checks structure only (days, slots, break membership, lunch
//! coverage, retry budget) and reports every problem at once. Time strings
//! are deliberately not parsed here: a malformed time is a per-call anomaly
//! handled by the [`ConflictChecker`].

mod conflict;

pub use conflict::{Candidate, ConflictChecker};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::models::{Day, Slot};

/// Default allocation retry budget.
pub const DEFAULT_MAX_RETRIES: u32 = 100;

/// Unvalidated catalog settings.
///
/// `Default` yields the reference configuration: Monday to Friday, ten
/// slots between 09:00 and 17:00 with a 10:30-11:00 break, and lunch
/// 13:00-14:00 every day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Schedulable days, in display order.
    pub days: Vec<Day>,
    /// Slots, in scan order.
    pub slots: Vec<Slot>,
    /// The fixed short break (must equal one of `slots`).
    pub fixed_break: Slot,
    /// Lunch interval per day.
    pub lunch: BTreeMap<Day, Slot>,
    /// Attempts allowed per allocation call.
    pub max_retries: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        let slots = [
            ("09:00", "10:00"),
            ("10:00", "10:30"),
            ("10:30", "11:00"),
            ("11:00", "12:00"),
            ("12:00", "13:00"),
            ("14:00", "15:00"),
            ("15:00", "16:00"),
            ("16:00", "17:00"),
            ("14:00", "15:30"),
            ("15:30", "17:00"),
        ]
        .into_iter()
        .map(|(s, e)| Slot::new(s, e))
        .collect();

        Self {
            days: Day::WEEKDAYS.to_vec(),
            slots,
            fixed_break: Slot::new("10:30", "11:00"),
            lunch: Day::WEEKDAYS
                .iter()
                .map(|&d| (d, Slot::new("13:00", "14:00")))
                .collect(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl CatalogSettings {
    /// Replaces the day list.
    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = days;
        self
    }

    /// Replaces the slot list.
    pub fn with_slots(mut self, slots: Vec<Slot>) -> Self {
        self.slots = slots;
        self
    }

    /// Sets the fixed break.
    pub fn with_fixed_break(mut self, slot: Slot) -> Self {
        self.fixed_break = slot;
        self
    }

    /// Sets one lunch interval for every configured day.
    pub fn with_lunch_all(mut self, lunch: Slot) -> Self {
        self.lunch = self.days.iter().map(|&d| (d, lunch.clone())).collect();
        self
    }

    /// Sets the lunch interval of one day.
    pub fn with_lunch(mut self, day: Day, lunch: Slot) -> Self {
        self.lunch.insert(day, lunch);
        self
    }

    /// Sets the retry budget.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Validates and builds the catalog.
    pub fn build(self) -> Result<SlotCatalog, Vec<CatalogError>> {
        SlotCatalog::new(self)
    }
}

/// A structural problem in catalog settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct CatalogError {
    /// Error category.
    pub kind: CatalogErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of catalog errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogErrorKind {
    /// No days configured.
    NoDays,
    /// A day appears twice.
    DuplicateDay,
    /// No slots configured.
    NoSlots,
    /// The fixed break is not one of the slots.
    BreakNotInCatalog,
    /// A day has no lunch interval.
    MissingLunch,
    /// Retry budget is zero.
    ZeroRetries,
}

impl CatalogError {
    fn new(kind: CatalogErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validated, read-only catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotCatalog {
    days: Vec<Day>,
    slots: Vec<Slot>,
    fixed_break: Slot,
    break_index: usize,
    lunch: BTreeMap<Day, Slot>,
    max_retries: u32,
}

impl SlotCatalog {
    /// Validates settings into a catalog.
    ///
    /// # Returns
    /// The catalog, or every structural error found.
    pub fn new(settings: CatalogSettings) -> Result<Self, Vec<CatalogError>> {
        let mut errors = Vec::new();

        if settings.days.is_empty() {
            errors.push(CatalogError::new(
                CatalogErrorKind::NoDays,
                "At least one day must be configured",
            ));
        }

        let mut seen = HashSet::new();
        for day in &settings.days {
            if !seen.insert(*day) {
                errors.push(CatalogError::new(
                    CatalogErrorKind::DuplicateDay,
                    format!("Duplicate day: {day}"),
                ));
            }
            if !settings.lunch.contains_key(day) {
                errors.push(CatalogError::new(
                    CatalogErrorKind::MissingLunch,
                    format!("No lunch interval configured for {day}"),
                ));
            }
        }

        if settings.slots.is_empty() {
            errors.push(CatalogError::new(
                CatalogErrorKind::NoSlots,
                "At least one slot must be configured",
            ));
        }

        let break_index = settings
            .slots
            .iter()
            .position(|s| *s == settings.fixed_break);
        if break_index.is_none() && !settings.slots.is_empty() {
            errors.push(CatalogError::new(
                CatalogErrorKind::BreakNotInCatalog,
                format!(
                    "Fixed break {} is not one of the configured slots",
                    settings.fixed_break
                ),
            ));
        }

        if settings.max_retries == 0 {
            errors.push(CatalogError::new(
                CatalogErrorKind::ZeroRetries,
                "max_retries must be at least 1",
            ));
        }

        match (errors.is_empty(), break_index) {
            (true, Some(break_index)) => Ok(Self {
                days: settings.days,
                slots: settings.slots,
                fixed_break: settings.fixed_break,
                break_index,
                lunch: settings.lunch,
                max_retries: settings.max_retries,
            }),
            _ => Err(errors),
        }
    }

    /// The reference configuration.
    pub fn reference() -> Self {
        let settings = CatalogSettings::default();
        let break_index = settings
            .slots
            .iter()
            .position(|s| *s == settings.fixed_break)
            .unwrap_or_default();
        Self {
            days: settings.days,
            slots: settings.slots,
            fixed_break: settings.fixed_break,
            break_index,
            lunch: settings.lunch,
            max_retries: settings.max_retries,
        }
    }

    /// Schedulable days in order.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Slots in scan order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot at an index.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The fixed break interval.
    pub fn fixed_break(&self) -> &Slot {
        &self.fixed_break
    }

    /// Index of the fixed break within the slot list.
    pub fn break_index(&self) -> usize {
        self.break_index
    }

    /// Lunch interval of a day, if configured.
    pub fn lunch(&self, day: Day) -> Option<&Slot> {
        self.lunch.get(&day)
    }

    /// Attempts allowed per allocation call.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Position of a day within the configured day list.
    pub fn day_position(&self, day: Day) -> Option<usize> {
        self.days.iter().position(|&d| d == day)
    }

    /// A conflict checker bound to this catalog.
    pub fn checker(&self) -> ConflictChecker<'_> {
        ConflictChecker::new(self)
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_catalog() {
        let cat = SlotCatalog::reference();
        assert_eq!(cat.days().len(), 5);
        assert_eq!(cat.slot_count(), 10);
        assert_eq!(cat.break_index(), 2);
        assert_eq!(cat.slot(2), Some(&Slot::new("10:30", "11:00")));
        assert_eq!(cat.max_retries(), 100);
        assert_eq!(cat.lunch(Day::Friday), Some(&Slot::new("13:00", "14:00")));
        assert_eq!(cat.lunch(Day::Saturday), None);
    }

    #[test]
    fn test_reference_matches_validated_default() {
        let built = CatalogSettings::default().build().unwrap();
        assert_eq!(built, SlotCatalog::reference());
    }

    #[test]
    fn test_break_must_be_in_catalog() {
        let errors = CatalogSettings::default()
            .with_fixed_break(Slot::new("10:45", "11:00"))
            .build()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, CatalogErrorKind::BreakNotInCatalog);
    }

    #[test]
    fn test_collects_all_errors() {
        let errors = CatalogSettings::default()
            .with_days(vec![Day::Monday, Day::Monday, Day::Saturday])
            .with_max_retries(0)
            .build()
            .unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&CatalogErrorKind::DuplicateDay));
        assert!(kinds.contains(&CatalogErrorKind::MissingLunch));
        assert!(kinds.contains(&CatalogErrorKind::ZeroRetries));
    }

    #[test]
    fn test_empty_catalog() {
        let errors = CatalogSettings::default()
            .with_days(Vec::new())
            .with_slots(Vec::new())
            .build()
            .unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(kinds, vec![CatalogErrorKind::NoDays, CatalogErrorKind::NoSlots]);
    }

    #[test]
    fn test_lunch_override() {
        let cat = CatalogSettings::default()
            .with_lunch(Day::Friday, Slot::new("12:30", "13:30"))
            .build()
            .unwrap();
        assert_eq!(cat.lunch(Day::Friday), Some(&Slot::new("12:30", "13:30")));
        assert_eq!(cat.lunch(Day::Monday), Some(&Slot::new("13:00", "14:00")));
    }

    #[test]
    fn test_day_position() {
        let cat = CatalogSettings::default()
            .with_days(vec![Day::Wednesday, Day::Monday])
            .build()
            .unwrap();
        assert_eq!(cat.day_position(Day::Monday), Some(1));
        assert_eq!(cat.day_position(Day::Friday), None);
    }
}
