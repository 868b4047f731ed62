//! Presentation of generated timetables.
//!
//! - [`GridView`]: terminal grid of one group, rows = catalog slots,
//!   columns = days, cells `CODE (L|P|B)`, followed by the course details
//! - [`TimetableView`]: every group's grid in group order
//! - [`CatalogView`]: a short summary of a catalog, for config checks
//! - [`to_json`]: machine-readable export of a whole run
//! - [`write_workbook`]: spreadsheet with one sheet per group

mod workbook;

pub use workbook::{build_workbook, sheet_name, write_workbook};

use serde::Serialize;
use std::fmt;

use crate::catalog::SlotCatalog;
use crate::models::{GroupTimetable, SessionRow, Timetable};
use crate::scheduler::{AllocationRecord, GenerationOutcome, ScheduleWarning, TimetableReport};

/// Minimum column width, matching the classic 12-character layout.
pub const MIN_COLUMN_WIDTH: usize = 12;

/// Terminal grid of one group.
pub struct GridView<'a> {
    grid: &'a GroupTimetable,
    catalog: &'a SlotCatalog,
}

impl<'a> GridView<'a> {
    pub fn new(grid: &'a GroupTimetable, catalog: &'a SlotCatalog) -> Self {
        Self { grid, catalog }
    }

    /// Cell texts indexed by [slot][day].
    fn cells(&self) -> Vec<Vec<String>> {
        let days = self.catalog.days();
        (0..self.catalog.slot_count())
            .map(|slot_index| {
                days.iter()
                    .map(|&day| {
                        self.grid
                            .session_at(day, slot_index)
                            .map(|s| s.cell())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.catalog.days();
        let cells = self.cells();
        let labels: Vec<String> = self.catalog.slots().iter().map(|s| s.label()).collect();

        let width = labels
            .iter()
            .map(String::len)
            .chain(cells.iter().flatten().map(String::len))
            .chain(days.iter().map(|d| d.name().len()))
            .max()
            .unwrap_or(0)
            .saturating_add(2)
            .max(MIN_COLUMN_WIDTH);

        let rule = "-".repeat(10);
        writeln!(f, "{rule} Timetable for {} {rule}", self.grid.group)?;

        let mut header = format!("{:<width$}", "Time");
        for day in days {
            header.push_str(&format!("{:<width$}", day.name()));
        }
        writeln!(f, "{}", header.trim_end())?;
        writeln!(f, "{}", "-".repeat(header.len()))?;

        for (label, row) in labels.iter().zip(&cells) {
            let mut line = format!("{label:<width$}");
            for cell in row {
                line.push_str(&format!("{cell:<width$}"));
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        if self.grid.courses.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "{:<10} {:<32} {:<12} Faculty", "Code", "Name", "L-T-P-S-C")?;
        for c in &self.grid.courses {
            let line = format!(
                "{:<10} {:<32} {:<12} {}",
                c.code,
                c.name,
                c.credit_spec,
                c.faculty.join(" / ")
            );
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

/// Every group's grid, separated by blank lines.
pub struct TimetableView<'a> {
    timetable: &'a Timetable,
    catalog: &'a SlotCatalog,
}

impl<'a> TimetableView<'a> {
    pub fn new(timetable: &'a Timetable, catalog: &'a SlotCatalog) -> Self {
        Self { timetable, catalog }
    }
}

impl fmt::Display for TimetableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, grid) in self.timetable.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", GridView::new(grid, self.catalog))?;
        }
        Ok(())
    }
}

/// Catalog summary.
pub struct CatalogView<'a>(pub &'a SlotCatalog);

impl fmt::Display for CatalogView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cat = self.0;
        let days: Vec<&str> = cat.days().iter().map(|d| d.name()).collect();
        writeln!(f, "Days: {}", days.join(", "))?;
        writeln!(f, "Max retries: {}", cat.max_retries())?;
        writeln!(f, "Slots:")?;
        for (i, slot) in cat.slots().iter().enumerate() {
            let marker = if i == cat.break_index() { " (break)" } else { "" };
            writeln!(f, "  [{i}] {slot}{marker}")?;
        }
        writeln!(f, "Lunch:")?;
        for &day in cat.days() {
            if let Some(lunch) = cat.lunch(day) {
                writeln!(f, "  {:<10} {lunch}", day.name())?;
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct Export<'a> {
    timetable: &'a Timetable,
    schedule: Vec<GroupRows>,
    allocations: &'a [AllocationRecord],
    warnings: Vec<WarningEntry<'a>>,
    report: TimetableReport,
}

/// Display rows of one group, in day then slot order.
#[derive(Serialize)]
struct GroupRows {
    group: String,
    rows: Vec<SessionRow>,
}

#[derive(Serialize)]
struct WarningEntry<'a> {
    message: String,
    detail: &'a ScheduleWarning,
}

/// Pretty-printed JSON of a run: timetable, flat display rows per group,
/// allocation records, warnings (with rendered messages) and the placement
/// report.
pub fn to_json(outcome: &GenerationOutcome, catalog: &SlotCatalog) -> serde_json::Result<String> {
    let export = Export {
        timetable: &outcome.timetable,
        schedule: outcome
            .timetable
            .iter()
            .map(|grid| GroupRows {
                group: grid.group.to_string(),
                rows: grid.rows(),
            })
            .collect(),
        allocations: &outcome.allocations,
        warnings: outcome
            .warnings
            .iter()
            .map(|w| WarningEntry {
                message: w.to_string(),
                detail: w,
            })
            .collect(),
        report: TimetableReport::calculate(outcome, catalog),
    };
    serde_json::to_string_pretty(&export)
}
