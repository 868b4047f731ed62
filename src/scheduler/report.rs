//! Placement summary per scheduling group.
//!
//! Computes requested vs. placed sessions, unmet requirements and
//! slot-usage distributions from a finished generation run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill rate | placed / requested (1.0 when nothing was requested) |
//! | Slot usage | non-break sessions per catalog slot index |
//! | Day usage | non-break sessions per configured day |
//! | Unmet | per (course, kind) shortfall |
//!
//! The slot-usage histogram makes the scan-order bias visible: earlier
//! catalog slots of a given duration fill first on every day.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::GenerationOutcome;
use crate::catalog::SlotCatalog;
use crate::models::{Day, SchedulingGroup, SessionKind};

/// A requirement the allocator could not fully satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetRequirement {
    /// Course code.
    pub course: String,
    /// Session kind.
    pub kind: SessionKind,
    /// Sessions requested.
    pub requested: u32,
    /// Sessions missing.
    pub unmet: u32,
}

/// Placement summary of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupReport {
    /// Group key.
    pub group: SchedulingGroup,
    /// Lecture sessions requested.
    pub lectures_requested: u32,
    /// Lecture sessions placed.
    pub lectures_placed: u32,
    /// Practical sessions requested.
    pub practicals_requested: u32,
    /// Practical sessions placed.
    pub practicals_placed: u32,
    /// Non-break sessions per slot index.
    pub slot_usage: Vec<usize>,
    /// Non-break sessions per day, in catalog day order.
    pub day_usage: Vec<(Day, usize)>,
    /// Shortfalls, in allocation order.
    pub unmet: Vec<UnmetRequirement>,
}

impl GroupReport {
    /// Placed / requested over both kinds.
    pub fn fill_rate(&self) -> f64 {
        let requested = self.lectures_requested + self.practicals_requested;
        if requested == 0 {
            return 1.0;
        }
        f64::from(self.lectures_placed + self.practicals_placed) / f64::from(requested)
    }
}

/// Placement summary of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableReport {
    /// Per-group summaries, in group order.
    pub groups: Vec<GroupReport>,
    /// Overall placed / requested.
    pub fill_rate: f64,
    /// Number of warnings raised during the run.
    pub warning_count: usize,
}

impl TimetableReport {
    /// Builds the report from a finished run.
    pub fn calculate(outcome: &GenerationOutcome, catalog: &SlotCatalog) -> Self {
        let mut groups: BTreeMap<SchedulingGroup, GroupReport> = BTreeMap::new();

        for grid in outcome.timetable.iter() {
            let mut slot_usage = vec![0usize; catalog.slot_count()];
            let mut day_usage: Vec<(Day, usize)> =
                catalog.days().iter().map(|&d| (d, 0)).collect();

            for s in grid.sessions.iter().filter(|s| !s.is_break()) {
                if let Some(count) = slot_usage.get_mut(s.slot_index) {
                    *count += 1;
                }
                if let Some((_, count)) = day_usage.iter_mut().find(|(d, _)| *d == s.day) {
                    *count += 1;
                }
            }

            groups.insert(
                grid.group.clone(),
                GroupReport {
                    group: grid.group.clone(),
                    lectures_requested: 0,
                    lectures_placed: 0,
                    practicals_requested: 0,
                    practicals_placed: 0,
                    slot_usage,
                    day_usage,
                    unmet: Vec::new(),
                },
            );
        }

        for record in &outcome.allocations {
            let Some(report) = groups.get_mut(&record.group) else {
                continue;
            };
            let r = &record.result;
            match record.kind {
                SessionKind::Lecture => {
                    report.lectures_requested += r.requested;
                    report.lectures_placed += r.placed;
                }
                SessionKind::Practical => {
                    report.practicals_requested += r.requested;
                    report.practicals_placed += r.placed;
                }
                SessionKind::Break => {}
            }
            if !r.is_complete() {
                report.unmet.push(UnmetRequirement {
                    course: record.course.clone(),
                    kind: record.kind,
                    requested: r.requested,
                    unmet: r.unmet(),
                });
            }
        }

        let requested = outcome.requested();
        let fill_rate = if requested == 0 {
            1.0
        } else {
            f64::from(outcome.placed()) / f64::from(requested)
        };

        Self {
            groups: groups.into_values().collect(),
            fill_rate,
            warning_count: outcome.warnings.len(),
        }
    }

    /// Report of one group.
    pub fn group(&self, group: &SchedulingGroup) -> Option<&GroupReport> {
        self.groups.iter().find(|g| &g.group == group)
    }

    /// Slot usage summed over all groups.
    pub fn total_slot_usage(&self) -> Vec<usize> {
        let len = self.groups.iter().map(|g| g.slot_usage.len()).max().unwrap_or(0);
        let mut total = vec![0usize; len];
        for g in &self.groups {
            for (i, n) in g.slot_usage.iter().enumerate() {
                total[i] += n;
            }
        }
        total
    }

    /// Whether the overall fill rate reaches the threshold.
    pub fn meets_threshold(&self, min_fill_rate: f64) -> bool {
        self.fill_rate >= min_fill_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSettings;
    use crate::models::Course;
    use crate::scheduler::{RandomDays, ScriptedDays, TimetablePipeline};

    fn courses() -> Vec<Course> {
        vec![
            Course::new("cse_a", "1", "CS101").with_credit_spec("3-0-2-0-4"),
            Course::new("cse_a", "1", "MA101").with_credit_spec("2-0-0-0-2"),
            Course::new("ece", "3", "EC201").with_credit_spec("1-0-0-0-1"),
        ]
    }

    #[test]
    fn test_report_counts() {
        let cat = SlotCatalog::reference();
        let outcome = TimetablePipeline::new(&cat).generate(&courses(), &mut RandomDays::seeded(4));
        let report = TimetableReport::calculate(&outcome, &cat);

        assert_eq!(report.groups.len(), 2);
        let cse = report.group(&SchedulingGroup::new("cse_a", "1")).unwrap();
        assert_eq!(cse.lectures_requested, 5);
        assert_eq!(cse.lectures_placed, 5);
        assert_eq!(cse.practicals_requested, 1);
        assert_eq!(cse.slot_usage.iter().sum::<usize>(), 6);
        assert_eq!(cse.slot_usage[cat.break_index()], 0);
        assert_eq!(cse.day_usage.iter().map(|(_, n)| n).sum::<usize>(), 6);
        assert!(cse.unmet.is_empty());
        assert!((cse.fill_rate() - 1.0).abs() < 1e-10);
        assert!((report.fill_rate - 1.0).abs() < 1e-10);
        assert!(report.meets_threshold(1.0));
    }

    #[test]
    fn test_report_unmet() {
        let cat = CatalogSettings::default()
            .with_days(vec![Day::Monday])
            .with_max_retries(5)
            .build()
            .unwrap();
        // Monday has 6 lecture slots; 8 requested
        let courses = vec![Course::new("cse_a", "1", "BIG").with_credit_spec("8-0-0-0-8")];
        let outcome =
            TimetablePipeline::new(&cat).generate(&courses, &mut ScriptedDays::constant(0));
        let report = TimetableReport::calculate(&outcome, &cat);

        let g = &report.groups[0];
        assert_eq!(g.lectures_placed, 5);
        assert_eq!(
            g.unmet,
            vec![UnmetRequirement {
                course: "BIG".into(),
                kind: SessionKind::Lecture,
                requested: 8,
                unmet: 3,
            }]
        );
        assert!((report.fill_rate - 5.0 / 8.0).abs() < 1e-10);
        assert_eq!(report.warning_count, 1);
        assert!(!report.meets_threshold(0.9));
    }

    #[test]
    fn test_early_slot_bias() {
        // 18 lectures over 30 lecture cells: each day fills its lecture
        // slots front to back, so usage never grows along the catalog.
        let cat = SlotCatalog::reference();
        let courses: Vec<Course> = (0..6)
            .map(|i| Course::new("cse_a", "1", format!("C{i}")).with_credit_spec("3-0-0-0-3"))
            .collect();
        let outcome = TimetablePipeline::new(&cat).generate(&courses, &mut RandomDays::seeded(5));
        let report = TimetableReport::calculate(&outcome, &cat);

        let usage = report.total_slot_usage();
        assert_eq!(usage.iter().sum::<usize>(), 18);
        for idle in [1, 2, 8, 9] {
            assert_eq!(usage[idle], 0, "slot {idle} is not a one-hour slot");
        }

        let lecture_slots = [0, 3, 4, 5, 6, 7];
        for pair in lecture_slots.windows(2) {
            assert!(
                usage[pair[0]] >= usage[pair[1]],
                "slot {} used more than slot {}: {usage:?}",
                pair[1],
                pair[0]
            );
        }
        // Six lecture slots a day: at least three days open at 09:00
        assert!(usage[0] >= 3);

        // Per day, the used lecture slots form a prefix
        let cse = report.group(&SchedulingGroup::new("cse_a", "1")).unwrap();
        let grid = outcome.timetable.group(&cse.group).unwrap();
        for &(day, n) in &cse.day_usage {
            assert!(lecture_slots[..n].iter().all(|&i| grid.session_at(day, i).is_some()));
        }
    }

    #[test]
    fn test_report_empty() {
        let cat = SlotCatalog::reference();
        let outcome = TimetablePipeline::new(&cat).generate(&[], &mut RandomDays::seeded(0));
        let report = TimetableReport::calculate(&outcome, &cat);
        assert!(report.groups.is_empty());
        assert!((report.fill_rate - 1.0).abs() < 1e-10);
        assert!(report.total_slot_usage().is_empty());
    }
}
