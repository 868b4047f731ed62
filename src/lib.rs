//! Course timetabling for the U-Engine ecosystem.
//!
//! Places weekly lecture and practical sessions for every (branch, semester)
//! group into a fixed grid of days × time slots, honouring a fixed short
//! break, per-day lunch intervals and slot durations.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Day`, `Slot`, `Course`, `CreditSpec`,
//!   `ScheduledSession`, `Timetable`
//! - **`catalog`**: The validated slot catalog and its `ConflictChecker`
//! - **`scheduler`**: `Occupancy`, the bounded-retry `Allocator`, the
//!   `TimetablePipeline` and placement reporting
//! - **`validation`**: Post-hoc timetable integrity checks
//! - **`config`**: Versioned TOML catalog configuration
//! - **`ingest`**: Course records from CSV, a branch/semester CSV tree, or JSON
//! - **`render`**: Terminal grid, JSON export and spreadsheet export
//!
//! # Example
//!
//! ```
//! use u_timetable::catalog::SlotCatalog;
//! use u_timetable::models::Course;
//! use u_timetable::scheduler::{RandomDays, TimetablePipeline};
//! use u_timetable::validation::validate_timetable;
//!
//! let catalog = SlotCatalog::reference();
//! let courses = vec![
//!     Course::new("cse_a", "3", "CS301").with_credit_spec("3-0-2-0-4"),
//!     Course::new("cse_a", "3", "CS302").with_credit_spec("2-1-0-0-3"),
//! ];
//!
//! let outcome = TimetablePipeline::new(&catalog).generate(&courses, &mut RandomDays::seeded(42));
//! assert!(outcome.is_complete());
//! assert!(validate_timetable(&outcome.timetable, &catalog).is_ok());
//! ```
//!
//! # Limitations
//!
//! The allocator is a randomized greedy heuristic. It does not backtrack,
//! optimize, or model faculty or room conflicts.

pub mod catalog;
pub mod config;
pub mod ingest;
pub mod models;
pub mod render;
pub mod scheduler;
pub mod validation;
