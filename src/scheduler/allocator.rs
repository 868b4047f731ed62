//! Randomized bounded-retry session allocator.
//!
//! # Algorithm
//!
//! 1. Pick a day uniformly at random.
//! 2. Scan the catalog in fixed order for the first slot that is not the
//!    fixed break, has exactly the required duration, does not overlap the
//!    day's lunch and is free for the group.
//! 3. If found, reserve it and record the session.
//! 4. Count the attempt whether or not a slot was found; stop when all
//!    sessions are placed or the retry budget is spent.
//!
//! The budget is shared by the whole requirement, not granted per session,
//! and the in-order scan favours earlier catalog slots. Both properties are
//! part of the observable behavior and are kept as is.
//!
//! A slot with an unparseable time is skipped and reported once per call,
//! so every requirement that loses the slot carries its own warning.
//!
//! # Complexity
//! O(r * s) per call where r = retry budget, s = catalog slots.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::num::NonZeroU32;
use tracing::{debug, warn};

use super::{DaySelector, GenerationContext, ScheduleWarning};
use crate::catalog::{Candidate, SlotCatalog};
use crate::models::{hours_to_minutes, Day, ScheduledSession, SchedulingGroup, SessionKind};

/// Outcome of one allocation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Sessions placed.
    pub placed: u32,
    /// Sessions requested.
    pub requested: u32,
    /// Attempts consumed.
    pub attempts: u32,
}

impl AllocationResult {
    /// Sessions that could not be placed.
    #[inline]
    pub fn unmet(&self) -> u32 {
        self.requested - self.placed
    }

    /// Whether every requested session was placed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.placed == self.requested
    }
}

/// Places sessions for one (group, course, kind) requirement at a time.
#[derive(Debug, Clone, Copy)]
pub struct Allocator<'a> {
    catalog: &'a SlotCatalog,
    max_retries: u32,
}

impl<'a> Allocator<'a> {
    /// Creates an allocator using the catalog's retry budget.
    pub fn new(catalog: &'a SlotCatalog) -> Self {
        Self {
            catalog,
            max_retries: catalog.max_retries(),
        }
    }

    /// Overrides the retry budget.
    pub fn with_max_retries(mut self, max_retries: NonZeroU32) -> Self {
        self.max_retries = max_retries.get();
        self
    }

    /// Retry budget per call.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Tries to place `count` sessions of `required_hours` for a course.
    ///
    /// Never fails: a shortfall is returned in the result and recorded as a
    /// [`ScheduleWarning::RetryExhausted`]. Sessions already placed are kept.
    #[allow(clippy::too_many_arguments)]
    pub fn allocate<S: DaySelector + ?Sized>(
        &self,
        ctx: &mut GenerationContext,
        selector: &mut S,
        group: &SchedulingGroup,
        course_code: &str,
        kind: SessionKind,
        required_hours: f64,
        count: u32,
    ) -> AllocationResult {
        let mut result = AllocationResult {
            requested: count,
            ..Default::default()
        };
        let days = self.catalog.days();
        if count == 0 || days.is_empty() {
            return result;
        }

        ctx.ensure_group(group);
        let required_minutes = hours_to_minutes(required_hours);
        let mut reported = HashSet::new();

        while result.placed < count && result.attempts < self.max_retries {
            let day = days[selector.select(days.len())];

            let found = self.find_slot(ctx, &mut reported, group, day, required_minutes);
            if let Some(slot_index) = found {
                self.place(ctx, group, course_code, kind, day, slot_index);
                result.placed += 1;
            }

            result.attempts += 1;
        }

        if !result.is_complete() {
            warn!(
                group = %group,
                course = course_code,
                kind = %kind,
                requested = result.requested,
                unmet = result.unmet(),
                attempts = result.attempts,
                "Retry budget exhausted"
            );
            ctx.warn(ScheduleWarning::RetryExhausted {
                group: group.clone(),
                course: course_code.to_string(),
                kind,
                requested: result.requested,
                unmet: result.unmet(),
                attempts: result.attempts,
            });
        }

        result
    }

    /// First eligible free slot on `day`, in catalog order.
    ///
    /// Invalid cells not yet in `reported` are warned about and added.
    fn find_slot(
        &self,
        ctx: &mut GenerationContext,
        reported: &mut HashSet<(Day, usize)>,
        group: &SchedulingGroup,
        day: Day,
        required_minutes: i64,
    ) -> Option<usize> {
        let checker = self.catalog.checker();

        for slot_index in 0..self.catalog.slot_count() {
            match checker.evaluate(day, slot_index, required_minutes) {
                Candidate::Eligible => {
                    if ctx.occupancy.is_free(group, day, slot_index) {
                        return Some(slot_index);
                    }
                }
                Candidate::Invalid(e) => {
                    if reported.insert((day, slot_index)) {
                        warn!(
                            day = %day,
                            slot_index,
                            value = %e.value,
                            "Invalid slot time, skipping"
                        );
                        ctx.warn(ScheduleWarning::InvalidSlot {
                            day,
                            slot_index,
                            value: e.value,
                        });
                    }
                }
                Candidate::FixedBreak | Candidate::DurationMismatch | Candidate::LunchConflict => {}
            }
        }

        None
    }

    fn place(
        &self,
        ctx: &mut GenerationContext,
        group: &SchedulingGroup,
        course_code: &str,
        kind: SessionKind,
        day: Day,
        slot_index: usize,
    ) {
        let Some(slot) = self.catalog.slot(slot_index) else {
            return;
        };
        ctx.occupancy.reserve(group, day, slot_index);
        ctx.timetable
            .group_mut(group)
            .sessions
            .push(ScheduledSession::new(course_code, day, slot_index, slot.clone(), kind));

        debug!(
            group = %group,
            course = course_code,
            kind = %kind,
            day = %day,
            slot = %slot,
            "Session placed"
        );
    }
}
