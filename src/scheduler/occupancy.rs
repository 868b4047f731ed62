//! Per-group slot occupancy.
//!
//! One boolean table per scheduling group, indexed by (day, slot). Tables
//! are created all-free the first time a group is referenced and only ever
//! move from free to used within a run.

use std::collections::BTreeMap;

use crate::catalog::SlotCatalog;
use crate::models::{Day, SchedulingGroup};

/// Occupancy tables for all groups of one generation run.
#[derive(Debug, Clone)]
pub struct Occupancy {
    days: Vec<Day>,
    slot_count: usize,
    tables: BTreeMap<SchedulingGroup, Vec<bool>>,
}

impl Occupancy {
    /// Creates empty occupancy shaped after the catalog's days × slots.
    pub fn new(catalog: &SlotCatalog) -> Self {
        Self {
            days: catalog.days().to_vec(),
            slot_count: catalog.slot_count(),
            tables: BTreeMap::new(),
        }
    }

    /// Initializes a group's table to all-free if not already present.
    pub fn ensure_group(&mut self, group: &SchedulingGroup) {
        let cells = self.days.len() * self.slot_count;
        self.tables
            .entry(group.clone())
            .or_insert_with(|| vec![false; cells]);
    }

    /// Whether the group has a table.
    pub fn contains_group(&self, group: &SchedulingGroup) -> bool {
        self.tables.contains_key(group)
    }

    /// Whether a cell is free.
    ///
    /// Unknown groups, days outside the catalog and out-of-range slots are
    /// never free.
    pub fn is_free(&self, group: &SchedulingGroup, day: Day, slot_index: usize) -> bool {
        match (self.tables.get(group), self.cell(day, slot_index)) {
            (Some(table), Some(cell)) => !table[cell],
            _ => false,
        }
    }

    /// Marks a cell used.
    ///
    /// Callers check [`is_free`](Self::is_free) immediately before.
    pub fn reserve(&mut self, group: &SchedulingGroup, day: Day, slot_index: usize) {
        let Some(cell) = self.cell(day, slot_index) else {
            return;
        };
        self.ensure_group(group);
        if let Some(table) = self.tables.get_mut(group) {
            table[cell] = true;
        }
    }

    /// Number of used cells in a group.
    pub fn used_count(&self, group: &SchedulingGroup) -> usize {
        self.tables
            .get(group)
            .map_or(0, |t| t.iter().filter(|&&used| used).count())
    }

    /// Number of free cells in a group (zero for unknown groups).
    pub fn free_count(&self, group: &SchedulingGroup) -> usize {
        self.tables
            .get(group)
            .map_or(0, |t| t.iter().filter(|&&used| !used).count())
    }

    /// Groups with a table, in key order.
    pub fn groups(&self) -> impl Iterator<Item = &SchedulingGroup> {
        self.tables.keys()
    }

    fn cell(&self, day: Day, slot_index: usize) -> Option<usize> {
        if slot_index >= self.slot_count {
            return None;
        }
        let day_pos = self.days.iter().position(|&d| d == day)?;
        Some(day_pos * self.slot_count + slot_index)
    }
}
