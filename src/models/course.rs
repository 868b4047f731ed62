//! Course and scheduling-group models.
//!
//! A course belongs to exactly one scheduling group (branch × semester) and
//! carries an `L-T-P-S-C` credit specification. Only the lecture and
//! practical hours drive scheduling; the rest is passed through for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Independent scheduling universe: one weekly grid per (branch, semester).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchedulingGroup {
    /// Branch / programme (e.g., "cse_a").
    pub branch: String,
    /// Semester label (e.g., "3").
    pub semester: String,
}

impl SchedulingGroup {
    /// Creates a group key.
    pub fn new(branch: impl Into<String>, semester: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            semester: semester.into(),
        }
    }
}

impl fmt::Display for SchedulingGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_sem{}", self.branch, self.semester)
    }
}

/// A course record as consumed by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Branch the course is offered to.
    pub branch: String,
    /// Semester the course is offered in.
    pub semester: String,
    /// Course code (e.g., "CS301").
    pub code: String,
    /// Human-readable course name.
    pub name: String,
    /// Raw credit specification, `L-T-P-S-C`.
    pub credit_spec: String,
    /// Faculty members (passthrough only).
    pub faculty: Vec<String>,
}

impl Course {
    /// Creates a course with the given group and code.
    pub fn new(
        branch: impl Into<String>,
        semester: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            branch: branch.into(),
            semester: semester.into(),
            code: code.into(),
            name: String::new(),
            credit_spec: String::new(),
            faculty: Vec::new(),
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the raw `L-T-P-S-C` credit specification.
    pub fn with_credit_spec(mut self, spec: impl Into<String>) -> Self {
        self.credit_spec = spec.into();
        self
    }

    /// Adds a faculty member.
    pub fn with_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.faculty.push(faculty.into());
        self
    }

    /// The scheduling group this course belongs to.
    pub fn group(&self) -> SchedulingGroup {
        SchedulingGroup::new(self.branch.clone(), self.semester.clone())
    }
}

/// Parsed `L-T-P-S-C` credit specification (hours per week, credits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreditSpec {
    /// Lecture hours per week.
    pub lecture: u32,
    /// Tutorial hours per week.
    pub tutorial: u32,
    /// Practical hours per week.
    pub practical: u32,
    /// Self-study hours per week.
    pub self_study: u32,
    /// Credits.
    pub credits: u32,
}

/// A credit specification that is not exactly five dash-separated integers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed credit specification '{0}': expected L-T-P-S-C")]
pub struct CreditSpecError(pub String);

impl FromStr for CreditSpec {
    type Err = CreditSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split('-')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| CreditSpecError(s.to_string()))?;

        match parts.as_slice() {
            &[lecture, tutorial, practical, self_study, credits] => Ok(Self {
                lecture,
                tutorial,
                practical,
                self_study,
                credits,
            }),
            _ => Err(CreditSpecError(s.to_string())),
        }
    }
}

impl CreditSpec {
    /// Number of one-hour lecture sessions per week.
    pub fn lecture_sessions(&self) -> u32 {
        self.lecture
    }

    /// Number of 1.5h practical sessions per week.
    ///
    /// Each session stands for two hours of practical load, so the count is
    /// `practical / 2` rounded half-to-even (1 → 0, 3 → 2, 5 → 2).
    pub fn practical_sessions(&self) -> u32 {
        (f64::from(self.practical) / 2.0).round_ties_even() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_display() {
        let g = SchedulingGroup::new("cse_a", "3");
        assert_eq!(g.to_string(), "cse_a_sem3");
    }

    #[test]
    fn test_course_builder() {
        let c = Course::new("ece", "5", "EC501")
            .with_name("Signals")
            .with_credit_spec("3-1-2-0-4")
            .with_faculty("Dr. A")
            .with_faculty("Dr. B");

        assert_eq!(c.group(), SchedulingGroup::new("ece", "5"));
        assert_eq!(c.name, "Signals");
        assert_eq!(c.faculty, vec!["Dr. A", "Dr. B"]);
    }

    #[test]
    fn test_credit_spec_parse() {
        let spec: CreditSpec = "3-0-4-0-7".parse().unwrap();
        assert_eq!(spec.lecture, 3);
        assert_eq!(spec.practical, 4);
        assert_eq!(spec.credits, 7);
        assert_eq!(spec.lecture_sessions(), 3);
        assert_eq!(spec.practical_sessions(), 2);
    }

    #[test]
    fn test_credit_spec_tolerates_spaces() {
        let spec: CreditSpec = " 2 - 0 - 2 - 0 - 3".parse().unwrap();
        assert_eq!(spec.lecture, 2);
        assert_eq!(spec.practical_sessions(), 1);
    }

    #[test]
    fn test_credit_spec_malformed() {
        assert!("bad-data".parse::<CreditSpec>().is_err());
        assert!("3-0-4-0".parse::<CreditSpec>().is_err());
        assert!("3-0-4-0-7-1".parse::<CreditSpec>().is_err());
        assert!("".parse::<CreditSpec>().is_err());
        assert!("3-0--1-0-7".parse::<CreditSpec>().is_err());
    }

    #[test]
    fn test_practical_rounding_half_even() {
        let sessions = |p: u32| {
            CreditSpec {
                practical: p,
                ..Default::default()
            }
            .practical_sessions()
        };
        assert_eq!(sessions(0), 0);
        assert_eq!(sessions(1), 0);
        assert_eq!(sessions(2), 1);
        assert_eq!(sessions(3), 2);
        assert_eq!(sessions(5), 2);
        assert_eq!(sessions(6), 3);
    }
}
