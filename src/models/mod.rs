//! Timetabling domain models.
//!
//! Provides the core data types for describing a weekly teaching grid
//! and the sessions placed in it.
//!
//! # Domain Mappings
//!
//! | u-timetable | Generic scheduling | University |
//! |-------------|--------------------|------------|
//! | Course | Task | Course offering |
//! | ScheduledSession | Assignment | Lecture / lab meeting |
//! | SchedulingGroup | Resource | Branch × semester cohort |
//! | Slot | Time window | Bell-schedule period |
//! | Timetable | Schedule | Weekly timetable |

mod course;
mod day;
mod session;
mod slot;
mod timetable;

pub use course::{Course, CreditSpec, CreditSpecError, SchedulingGroup};
pub use day::{Day, UnknownDay};
pub use session::{ScheduledSession, SessionKind, SessionRow, BREAK_PLACEHOLDER};
pub use slot::{
    hours_to_minutes, parse_time_of_day, Slot, SlotTimeError, SlotTimes, TIME_FORMAT,
};
pub use timetable::{CourseDetail, GroupTimetable, Timetable};
