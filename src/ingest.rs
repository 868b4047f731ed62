//! Course record ingestion.
//!
//! Three input shapes are accepted:
//! - **CSV** with the headers `Branch`, `Semester`, `Course Code`,
//!   `Course Name`, `L-T-P-S-C`, `Faculty` (snake_case headers also work)
//! - **Course tree**: `<root>/<branch>/sem<N>/*.csv`, where branch and
//!   semester come from the folder names and override any columns
//! - **JSON**: an array of objects with the snake_case keys `branch`,
//!   `semester`, `course_code`, `course_name`, `ltpsc`, `faculty`, or the
//!   tabular headers above as aliases
//!
//! Normalization:
//! - `semester` may be a number, a string, or a `semN` folder label
//! - `faculty` may be a `/`-separated string, a list, or a bracketed list
//!   literal such as `['Dr. A', 'Dr. B']` (how compiled CSVs store lists)
//! - surrounding whitespace is trimmed everywhere
//!
//! The credit specification is passed through untouched; malformed
//! values are reported by the pipeline, not rejected here.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Course;

/// Ingestion errors
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read course file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse course JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to parse course CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Record {index}: {message}")]
    InvalidRecord { index: usize, message: String },
}

pub type IngestResult<T> = Result<T, IngestError>;

/// One course record as it appears in the input.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseRecord {
    #[serde(alias = "Branch")]
    pub branch: String,

    #[serde(alias = "Semester")]
    pub semester: SemesterField,

    #[serde(alias = "Course Code")]
    pub course_code: String,

    #[serde(alias = "Course Name", default)]
    pub course_name: String,

    #[serde(alias = "L-T-P-S-C", default)]
    pub ltpsc: String,

    #[serde(alias = "Faculty", default)]
    pub faculty: FacultyField,
}

/// One CSV row. Every column is text; branch and semester may be absent
/// when they come from the folder layout instead.
#[derive(Debug, Clone, Deserialize)]
struct CsvRow {
    #[serde(rename = "Branch", alias = "branch", default)]
    branch: String,

    #[serde(rename = "Semester", alias = "semester", default)]
    semester: String,

    #[serde(rename = "Course Code", alias = "course_code")]
    course_code: String,

    #[serde(rename = "Course Name", alias = "course_name", default)]
    course_name: String,

    #[serde(rename = "L-T-P-S-C", alias = "ltpsc", default)]
    ltpsc: String,

    #[serde(rename = "Faculty", alias = "faculty", default)]
    faculty: String,
}

impl From<CsvRow> for CourseRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            branch: row.branch,
            semester: SemesterField::Label(row.semester),
            course_code: row.course_code,
            course_name: row.course_name,
            ltpsc: row.ltpsc,
            faculty: FacultyField::Joined(row.faculty),
        }
    }
}

/// Semester as a number or a label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SemesterField {
    Number(u64),
    Label(String),
}

impl SemesterField {
    /// Canonical semester label: `"sem5"`, `" 5 "` and `5` all become `"5"`.
    pub fn normalize(&self) -> String {
        match self {
            SemesterField::Number(n) => n.to_string(),
            SemesterField::Label(s) => {
                let s = s.trim();
                match s.get(..3) {
                    Some(prefix) if prefix.eq_ignore_ascii_case("sem") => {
                        s[3..].trim().to_string()
                    }
                    _ => s.to_string(),
                }
            }
        }
    }
}

/// Faculty as a list or a joined string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FacultyField {
    List(Vec<String>),
    Joined(String),
}

impl Default for FacultyField {
    fn default() -> Self {
        FacultyField::List(Vec::new())
    }
}

impl FacultyField {
    /// Trimmed, non-empty faculty names.
    pub fn names(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            FacultyField::List(list) => list.iter().map(String::as_str).collect(),
            FacultyField::Joined(s) => {
                let s = s.trim();
                match s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                    Some(inner) => inner
                        .split(',')
                        .map(|n| n.trim().trim_matches(|c| c == '\'' || c == '"'))
                        .collect(),
                    None => s.split('/').collect(),
                }
            }
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
            .collect()
    }
}

impl CourseRecord {
    /// Converts the record into a course.
    ///
    /// `index` is the record's position, used in error messages.
    pub fn into_course(self, index: usize) -> IngestResult<Course> {
        let branch = self.branch.trim();
        let code = self.course_code.trim();
        let semester = self.semester.normalize();

        let missing = [("branch", branch), ("semester", semester.as_str()), ("course_code", code)]
            .into_iter()
            .find(|(_, value)| value.is_empty());
        if let Some((field, _)) = missing {
            return Err(IngestError::InvalidRecord {
                index,
                message: format!("{field} must not be empty"),
            });
        }

        Ok(Course {
            branch: branch.to_string(),
            semester,
            code: code.to_string(),
            name: self.course_name.trim().to_string(),
            credit_spec: self.ltpsc.trim().to_string(),
            faculty: self.faculty.names(),
        })
    }
}

/// Load courses from a JSON file, a CSV file or a course tree
///
/// Directories are read as a course tree; files ending in `.csv` as CSV;
/// anything else as JSON.
pub fn load_courses(path: impl AsRef<Path>) -> IngestResult<Vec<Course>> {
    let path = path.as_ref();
    if path.is_dir() {
        return load_course_tree(path);
    }

    let content = std::fs::read_to_string(path)?;
    if has_extension(path, "csv") {
        parse_courses_csv(&content)
    } else {
        parse_courses(&content)
    }
}

/// Parse courses from a JSON array of records
pub fn parse_courses(content: &str) -> IngestResult<Vec<Course>> {
    let records: Vec<CourseRecord> = serde_json::from_str(content)?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_course(i))
        .collect()
}

/// Parse courses from CSV with a header row
pub fn parse_courses_csv(content: &str) -> IngestResult<Vec<Course>> {
    read_csv_rows(content)?
        .into_iter()
        .enumerate()
        .map(|(i, row)| CourseRecord::from(row).into_course(i))
        .collect()
}

/// Load every `<root>/<branch>/sem<N>/*.csv` file.
///
/// Branches, semesters and files are visited in name order. Branch and
/// semester are taken from the folder names.
pub fn load_course_tree(root: impl AsRef<Path>) -> IngestResult<Vec<Course>> {
    let mut courses = Vec::new();

    for branch_dir in sorted_entries(root.as_ref())?.into_iter().filter(|p| p.is_dir()) {
        let branch = file_name(&branch_dir);

        for sem_dir in sorted_entries(&branch_dir)?.into_iter().filter(|p| is_semester_dir(p)) {
            let semester = file_name(&sem_dir);

            for file in sorted_entries(&sem_dir)?
                .into_iter()
                .filter(|p| p.is_file() && has_extension(p, "csv"))
            {
                let content = std::fs::read_to_string(&file)?;
                for row in read_csv_rows(&content)? {
                    let record = CourseRecord {
                        branch: branch.clone(),
                        semester: SemesterField::Label(semester.clone()),
                        ..CourseRecord::from(row)
                    };
                    let index = courses.len();
                    courses.push(record.into_course(index)?);
                }
            }
        }
    }

    Ok(courses)
}

fn read_csv_rows(content: &str) -> IngestResult<Vec<CsvRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let rows = reader.deserialize().collect::<Result<Vec<CsvRow>, _>>()?;
    Ok(rows)
}

fn sorted_entries(dir: &Path) -> IngestResult<Vec<PathBuf>> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_semester_dir(path: &Path) -> bool {
    path.is_dir()
        && file_name(path)
            .get(..3)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("sem"))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
}
