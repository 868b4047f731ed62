//! Slot allocation engine.
//!
//! Turns course credit requirements into a weekly timetable with a
//! randomized, bounded-retry greedy heuristic.
//!
//! # Algorithm
//!
//! `TimetablePipeline` walks the courses in input order and asks the
//! `Allocator` for L lectures and round(P/2) practicals per course. The
//! allocator draws a random day and takes the first free catalog slot of
//! the right duration that avoids the break and lunch. It is not optimal
//! and does not backtrack; shortfalls are reported, not repaired.
//!
//! # State
//!
//! All mutable state of a run lives in a `GenerationContext`
//! (occupancy, timetable, warnings). Day choice goes through a
//! `DaySelector` so runs can be seeded or scripted.
//!
//! # Reporting
//!
//! `TimetableReport` summarizes placement per group, including the
//! slot-usage histogram that exposes the early-slot bias of the scan.

mod allocator;
mod context;
mod occupancy;
mod pipeline;
mod report;
mod selector;

pub use allocator::{AllocationResult, Allocator};
pub use context::{GenerationContext, ScheduleWarning};
pub use occupancy::Occupancy;
pub use pipeline::{
    generate_seeded, session_requirements, AllocationRecord, GenerationOutcome, TimetablePipeline,
};
pub use report::{GroupReport, TimetableReport, UnmetRequirement};
pub use selector::{DaySelector, RandomDays, ScriptedDays};
