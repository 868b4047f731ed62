//! Per-run generation state.
//!
//! Everything a generation run mutates lives here: occupancy tables, the
//! timetable under construction and the accumulated warnings. A fresh run
//! starts from a fresh context; nothing is shared between runs.

use serde::{Deserialize, Serialize};

use super::Occupancy;
use crate::catalog::SlotCatalog;
use crate::models::{Day, SchedulingGroup, SessionKind, Timetable};

/// A non-fatal anomaly recorded during generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ScheduleWarning {
    /// The credit specification could not be parsed; treated as no sessions.
    #[error("{group}: course {course} has malformed credit specification '{spec}', scheduling 0 sessions")]
    MalformedCreditSpec {
        group: SchedulingGroup,
        course: String,
        spec: String,
    },

    /// A slot (or the day's lunch) has an unparseable time and was skipped.
    #[error("Slot {slot_index} on {day} skipped: invalid time '{value}'")]
    InvalidSlot {
        day: Day,
        slot_index: usize,
        value: String,
    },

    /// The retry budget ran out before all sessions were placed.
    #[error("{group}: failed to allocate {unmet} of {requested} {kind} sessions for {course} after {attempts} attempts")]
    RetryExhausted {
        group: SchedulingGroup,
        course: String,
        kind: SessionKind,
        requested: u32,
        unmet: u32,
        attempts: u32,
    },
}

/// Mutable state of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Occupancy tables per group.
    pub occupancy: Occupancy,
    /// Timetable under construction.
    pub timetable: Timetable,
    /// Warnings in the order they were raised.
    pub warnings: Vec<ScheduleWarning>,
}

impl GenerationContext {
    /// Creates an empty context for a catalog.
    pub fn new(catalog: &SlotCatalog) -> Self {
        Self {
            occupancy: Occupancy::new(catalog),
            timetable: Timetable::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates the group's occupancy table and session list if new.
    pub fn ensure_group(&mut self, group: &SchedulingGroup) {
        self.occupancy.ensure_group(group);
        self.timetable.group_mut(group);
    }

    /// Records a warning.
    pub fn warn(&mut self, warning: ScheduleWarning) {
        self.warnings.push(warning);
    }
}
