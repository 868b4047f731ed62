//! Spreadsheet export.
//!
//! One worksheet per scheduling group, in group order:
//!
//! | Row | Content |
//! |-----|---------|
//! | 0 | `Day`, then one column per catalog slot (`HH:MM - HH:MM`) |
//! | 1..=D | one row per configured day, cells `CODE (L|P|B)` |
//! | D+1 | blank |
//! | D+2 | course detail header |
//! | D+3.. | one row per course, in input order |

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

use crate::catalog::SlotCatalog;
use crate::models::{GroupTimetable, SchedulingGroup, Timetable};

/// Longest sheet name a workbook accepts.
const MAX_SHEET_NAME: usize = 31;

/// Course detail columns, in output order.
const DETAIL_HEADERS: [&str; 4] = ["Course Code", "Course Name", "Faculty", "L-T-P-S-C"];

/// Builds the workbook in memory.
pub fn build_workbook(
    timetable: &Timetable,
    catalog: &SlotCatalog,
) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for grid in timetable.iter() {
        let sheet = workbook.add_worksheet();
        write_group_sheet(sheet, grid, catalog, &header)?;
    }

    Ok(workbook)
}

/// Writes the workbook to `path`.
pub fn write_workbook(
    timetable: &Timetable,
    catalog: &SlotCatalog,
    path: impl AsRef<Path>,
) -> Result<(), XlsxError> {
    let mut workbook = build_workbook(timetable, catalog)?;
    workbook.save(path.as_ref())
}

/// Sheet name for a group, with characters Excel rejects replaced.
pub fn sheet_name(group: &SchedulingGroup) -> String {
    group
        .to_string()
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME)
        .collect()
}

fn write_group_sheet(
    sheet: &mut Worksheet,
    grid: &GroupTimetable,
    catalog: &SlotCatalog,
    header: &Format,
) -> Result<(), XlsxError> {
    sheet.set_name(sheet_name(&grid.group))?;

    sheet.write_string_with_format(0, 0, "Day", header)?;
    for (i, slot) in catalog.slots().iter().enumerate() {
        let col = (i + 1) as u16;
        sheet.write_string_with_format(0, col, slot.label(), header)?;
        sheet.set_column_width(col, 14)?;
    }

    for (d, &day) in catalog.days().iter().enumerate() {
        let row = (d + 1) as u32;
        sheet.write_string(row, 0, day.name())?;
        for slot_index in 0..catalog.slot_count() {
            if let Some(session) = grid.session_at(day, slot_index) {
                sheet.write_string(row, (slot_index + 1) as u16, session.cell())?;
            }
        }
    }

    let start = (catalog.days().len() + 2) as u32;
    for (col, title) in DETAIL_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(start, col as u16, *title, header)?;
    }
    for (i, course) in grid.courses.iter().enumerate() {
        let row = start + 1 + i as u32;
        sheet.write_string(row, 0, &course.code)?;
        sheet.write_string(row, 1, &course.name)?;
        sheet.write_string(row, 2, course.faculty.join(" / "))?;
        sheet.write_string(row, 3, &course.credit_spec)?;
    }

    Ok(())
}
