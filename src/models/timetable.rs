//! Timetable (solution) model.
//!
//! A timetable holds, per scheduling group, the sessions placed in its
//! weekly grid and the course-detail side table that renderers print
//! beneath the grid. Groups are kept in a sorted map so iteration order,
//! and therefore any rendering, is deterministic.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use super::{Course, Day, ScheduledSession, SchedulingGroup, SessionKind, SessionRow};

/// Course information recorded for presentation, independent of placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetail {
    /// Course code.
    pub code: String,
    /// Course name.
    pub name: String,
    /// Faculty members.
    pub faculty: Vec<String>,
    /// Raw `L-T-P-S-C` specification as given.
    pub credit_spec: String,
}

impl From<&Course> for CourseDetail {
    fn from(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            faculty: course.faculty.clone(),
            credit_spec: course.credit_spec.clone(),
        }
    }
}

/// Weekly grid of one scheduling group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTimetable {
    /// Group key.
    pub group: SchedulingGroup,
    /// Sessions in placement order (breaks last).
    pub sessions: Vec<ScheduledSession>,
    /// Course details in input order.
    pub courses: Vec<CourseDetail>,
}

impl GroupTimetable {
    /// Creates an empty grid for a group.
    pub fn new(group: SchedulingGroup) -> Self {
        Self {
            group,
            sessions: Vec::new(),
            courses: Vec::new(),
        }
    }

    /// Sessions ordered for display: by day, then slot index.
    pub fn sorted_sessions(&self) -> Vec<&ScheduledSession> {
        let mut sorted: Vec<&ScheduledSession> = self.sessions.iter().collect();
        sorted.sort_by_key(|s| (s.day, s.slot_index));
        sorted
    }

    /// Display rows, ordered by day then slot.
    pub fn rows(&self) -> Vec<SessionRow> {
        self.sorted_sessions().into_iter().map(|s| s.row()).collect()
    }

    /// The session occupying a cell, if any.
    pub fn session_at(&self, day: Day, slot_index: usize) -> Option<&ScheduledSession> {
        self.sessions
            .iter()
            .find(|s| s.day == day && s.slot_index == slot_index)
    }

    /// All sessions of a course.
    pub fn sessions_for_course(&self, code: &str) -> Vec<&ScheduledSession> {
        self.sessions
            .iter()
            .filter(|s| !s.is_break() && s.course_code == code)
            .collect()
    }

    /// Number of sessions of the given kind.
    pub fn count_kind(&self, kind: SessionKind) -> usize {
        self.sessions.iter().filter(|s| s.kind == kind).count()
    }
}

/// Complete timetable across all scheduling groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Per-group grids, serialized as a list ordered by group key.
    #[serde(
        serialize_with = "serialize_groups",
        deserialize_with = "deserialize_groups"
    )]
    pub groups: BTreeMap<SchedulingGroup, GroupTimetable>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the grid of a group, creating it on first reference.
    pub fn group_mut(&mut self, group: &SchedulingGroup) -> &mut GroupTimetable {
        self.groups
            .entry(group.clone())
            .or_insert_with(|| GroupTimetable::new(group.clone()))
    }

    /// Returns the grid of a group.
    pub fn group(&self, group: &SchedulingGroup) -> Option<&GroupTimetable> {
        self.groups.get(group)
    }

    /// Iterates grids in group order.
    pub fn iter(&self) -> impl Iterator<Item = &GroupTimetable> {
        self.groups.values()
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of sessions (including breaks).
    pub fn session_count(&self) -> usize {
        self.groups.values().map(|g| g.sessions.len()).sum()
    }
}

fn serialize_groups<S: Serializer>(
    groups: &BTreeMap<SchedulingGroup, GroupTimetable>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(groups.values())
}

fn deserialize_groups<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<SchedulingGroup, GroupTimetable>, D::Error> {
    let list = Vec::<GroupTimetable>::deserialize(deserializer)?;
    Ok(list.into_iter().map(|g| (g.group.clone(), g)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;

    fn sample_timetable() -> Timetable {
        let g = SchedulingGroup::new("cse_a", "1");
        let mut t = Timetable::new();
        let grid = t.group_mut(&g);
        grid.sessions.push(ScheduledSession::new(
            "CS101",
            Day::Wednesday,
            0,
            Slot::new("09:00", "10:00"),
            SessionKind::Lecture,
        ));
        grid.sessions.push(ScheduledSession::new(
            "CS101",
            Day::Monday,
            3,
            Slot::new("11:00", "12:00"),
            SessionKind::Lecture,
        ));
        grid.sessions.push(ScheduledSession::fixed_break(
            Day::Monday,
            2,
            Slot::new("10:30", "11:00"),
        ));
        grid.courses.push(CourseDetail::from(
            &Course::new("cse_a", "1", "CS101").with_credit_spec("2-0-0-0-2"),
        ));
        t
    }

    #[test]
    fn test_group_created_lazily() {
        let mut t = Timetable::new();
        let g = SchedulingGroup::new("ece", "3");
        assert!(t.group(&g).is_none());
        t.group_mut(&g);
        t.group_mut(&g);
        assert_eq!(t.group_count(), 1);
        assert!(t.group(&g).unwrap().sessions.is_empty());
    }

    #[test]
    fn test_sorted_sessions() {
        let t = sample_timetable();
        let grid = t.group(&SchedulingGroup::new("cse_a", "1")).unwrap();
        let order: Vec<(Day, usize)> = grid
            .sorted_sessions()
            .iter()
            .map(|s| (s.day, s.slot_index))
            .collect();
        assert_eq!(
            order,
            vec![(Day::Monday, 2), (Day::Monday, 3), (Day::Wednesday, 0)]
        );
    }

    #[test]
    fn test_rows_display_order() {
        let t = sample_timetable();
        let rows = t.group(&SchedulingGroup::new("cse_a", "1")).unwrap().rows();
        let flat: Vec<(&str, &str, &str, &str)> = rows
            .iter()
            .map(|r| (r.course_code.as_str(), r.day.as_str(), r.time.as_str(), r.kind.as_str()))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("-", "Monday", "10:30 - 11:00", "Break"),
                ("CS101", "Monday", "11:00 - 12:00", "Lecture"),
                ("CS101", "Wednesday", "09:00 - 10:00", "Lecture"),
            ]
        );
    }

    #[test]
    fn test_lookups() {
        let t = sample_timetable();
        let grid = t.group(&SchedulingGroup::new("cse_a", "1")).unwrap();
        assert_eq!(grid.session_at(Day::Monday, 3).unwrap().course_code, "CS101");
        assert!(grid.session_at(Day::Friday, 3).is_none());
        assert_eq!(grid.sessions_for_course("CS101").len(), 2);
        assert_eq!(grid.count_kind(SessionKind::Break), 1);
        assert_eq!(t.session_count(), 3);
    }

    #[test]
    fn test_json_shape() {
        let t = sample_timetable();
        let json = serde_json::to_value(&t).unwrap();
        assert!(json["groups"].is_array());
        assert_eq!(json["groups"][0]["group"]["branch"], "cse_a");

        let back: Timetable = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }
}
