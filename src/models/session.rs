//! Scheduled session model.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Day, Slot};

/// Placeholder course code used for break entries.
pub const BREAK_PLACEHOLDER: &str = "-";

/// Kind of a scheduled session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    /// One-hour lecture.
    Lecture,
    /// 1.5h practical (two hours of practical load).
    Practical,
    /// Fixed short break.
    Break,
}

impl SessionKind {
    /// Required slot duration in hours; `None` for breaks.
    pub fn required_hours(&self) -> Option<f64> {
        match self {
            SessionKind::Lecture => Some(1.0),
            SessionKind::Practical => Some(1.5),
            SessionKind::Break => None,
        }
    }

    /// Label used in rendered output.
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Lecture => "Lecture",
            SessionKind::Practical => "Practical",
            SessionKind::Break => "Break",
        }
    }

    /// Single-letter abbreviation for grid cells.
    pub fn short(&self) -> char {
        match self {
            SessionKind::Lecture => 'L',
            SessionKind::Practical => 'P',
            SessionKind::Break => 'B',
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A session placed in the weekly grid of one scheduling group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSession {
    /// Course code, or [`BREAK_PLACEHOLDER`] for breaks.
    pub course_code: String,
    /// Day of the session.
    pub day: Day,
    /// Index of the slot in the catalog.
    pub slot_index: usize,
    /// The slot itself (exact catalog strings).
    pub slot: Slot,
    /// Session kind.
    pub kind: SessionKind,
}

impl ScheduledSession {
    /// Creates a course session.
    pub fn new(
        course_code: impl Into<String>,
        day: Day,
        slot_index: usize,
        slot: Slot,
        kind: SessionKind,
    ) -> Self {
        Self {
            course_code: course_code.into(),
            day,
            slot_index,
            slot,
            kind,
        }
    }

    /// Creates a break entry.
    pub fn fixed_break(day: Day, slot_index: usize, slot: Slot) -> Self {
        Self::new(BREAK_PLACEHOLDER, day, slot_index, slot, SessionKind::Break)
    }

    /// Whether this entry is a break.
    #[inline]
    pub fn is_break(&self) -> bool {
        self.kind == SessionKind::Break
    }

    /// Grid cell text, e.g. `"CS301 (L)"`.
    pub fn cell(&self) -> String {
        format!("{} ({})", self.course_code, self.kind.short())
    }

    /// Flat display row for external renderers.
    pub fn row(&self) -> SessionRow {
        SessionRow {
            course_code: self.course_code.clone(),
            day: self.day.to_string(),
            time: self.slot.label(),
            kind: self.kind.label().to_string(),
        }
    }
}

/// Renderer-facing view of a session: code, day, `HH:MM - HH:MM`, kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRow {
    /// Course code or `-`.
    pub course_code: String,
    /// Day name.
    pub day: String,
    /// Time label.
    pub time: String,
    /// Kind label.
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_hours() {
        assert_eq!(SessionKind::Lecture.required_hours(), Some(1.0));
        assert_eq!(SessionKind::Practical.required_hours(), Some(1.5));
        assert_eq!(SessionKind::Break.required_hours(), None);
    }

    #[test]
    fn test_break_session() {
        let s = ScheduledSession::fixed_break(Day::Monday, 2, Slot::new("10:30", "11:00"));
        assert!(s.is_break());
        assert_eq!(s.course_code, "-");
        assert_eq!(s.cell(), "- (B)");
    }

    #[test]
    fn test_session_row() {
        let s = ScheduledSession::new(
            "CS301",
            Day::Tuesday,
            8,
            Slot::new("14:00", "15:30"),
            SessionKind::Practical,
        );
        let row = s.row();
        assert_eq!(row.course_code, "CS301");
        assert_eq!(row.day, "Tuesday");
        assert_eq!(row.time, "14:00 - 15:30");
        assert_eq!(row.kind, "Practical");
        assert_eq!(s.cell(), "CS301 (P)");
    }
}
