//! # punchcard-core
//!
//! Core domain model and traits for punchcard attendance summaries.
//!
//! This crate provides:
//! - Domain types: `CellValue`, `Table`, `PunchRecord`, `DailySummary`, `DailyReport`
//! - Core traits: `Summarizer`, `Renderer`, `Dialogs`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use punchcard_core::{CellValue, Table};
//!
//! let mut table = Table::new(vec!["Person Id".into(), "Punch Date".into()]);
//! table.push_row(vec![CellValue::Int(1), "2024-01-01".into()]);
//! table.normalize_headers();
//!
//! assert_eq!(table.headers, vec!["person_id", "punch_date"]);
//! assert_eq!(table.column_index("punch_date").unwrap(), 1);
//! ```

pub mod cell;

pub use cell::CellValue;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Columns
// ============================================================================

pub const PERSON_ID: &str = "person_id";
pub const PERSON_NAME: &str = "person_name";
pub const PUNCH_DATE: &str = "punch_date";
pub const ATTENDANCE_RECORD: &str = "attendance_record";

/// Output column order of the daily report
pub const REPORT_COLUMNS: [&str; 7] = [
    PERSON_ID,
    PERSON_NAME,
    PUNCH_DATE,
    "punch_count",
    "first_punch",
    "last_punch",
    "in_to_out_time",
];

/// Normalize a header: lowercase, spaces replaced with underscores
pub fn normalize_header(header: &str) -> String {
    header.to_lowercase().replace(' ', "_")
}

// ============================================================================
// Table
// ============================================================================

/// In-memory tabular input: one header row plus data rows
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a data row
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rewrite every header in normalized form
    pub fn normalize_headers(&mut self) {
        for header in &mut self.headers {
            *header = normalize_header(header);
        }
    }

    /// Position of a column by exact (already normalized) name
    pub fn column_index(&self, name: &str) -> Result<usize, SummaryError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SummaryError::MissingColumn(name.to_string()))
    }

    /// Cell at a row and column; short rows read as empty
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&CellValue::Empty)
    }
}

// ============================================================================
// Records and summaries
// ============================================================================

/// One raw clock event with its derived timestamp
#[derive(Clone, Debug, PartialEq)]
pub struct PunchRecord {
    pub person_id: CellValue,
    pub person_name: CellValue,
    pub punch_date: CellValue,
    pub attendance_record: CellValue,
    /// Combined punch_date + attendance_record
    pub full_timestamp: NaiveDateTime,
}

/// Aggregate of all punches for one person on one date
#[derive(Clone, Debug, PartialEq)]
pub struct DailySummary {
    pub person_id: CellValue,
    pub person_name: CellValue,
    pub punch_date: CellValue,
    pub punch_count: usize,
    pub first_punch: NaiveTime,
    pub last_punch: NaiveTime,
    /// Elapsed first-to-last span as a time of day; wraps at 24 hours
    pub in_to_out_time: NaiveTime,
    /// Unwrapped elapsed span
    pub elapsed: TimeDelta,
}

impl DailySummary {
    /// Whether `in_to_out_time` lost whole days to the 24 hour wrap
    pub fn is_wrapped(&self) -> bool {
        self.elapsed >= TimeDelta::days(1)
    }

    /// Cells in `REPORT_COLUMNS` order
    pub fn to_row(&self) -> Vec<CellValue> {
        vec![
            self.person_id.clone(),
            self.person_name.clone(),
            self.punch_date.clone(),
            CellValue::Int(self.punch_count as i64),
            CellValue::Time(self.first_punch),
            CellValue::Time(self.last_punch),
            CellValue::Time(self.in_to_out_time),
        ]
    }
}

/// Ordered daily summaries ready for output
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DailyReport {
    pub summaries: Vec<DailySummary>,
}

impl DailyReport {
    pub fn new(summaries: Vec<DailySummary>) -> Self {
        Self { summaries }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &REPORT_COLUMNS
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<CellValue>> + '_ {
        self.summaries.iter().map(DailySummary::to_row)
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Turns raw punch tables into daily summaries
pub trait Summarizer {
    fn summarize(&self, table: &Table) -> Result<DailyReport, SummaryError>;
}

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a report to the output format
    fn render(&self, report: &DailyReport) -> Result<Self::Output, RenderError>;
}

/// The two user-facing interactions a run needs.
///
/// Implementations own whatever toolkit state the dialogs require and release
/// it when dropped.
pub trait Dialogs {
    /// Ask for an input file; `None` means the user cancelled
    fn pick_file(&mut self) -> Option<PathBuf>;

    /// Show a completion message
    fn notify(&mut self, message: &str);
}

// ============================================================================
// Errors
// ============================================================================

/// Transform error
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Unparseable timestamp at row {row}: '{value}'")]
    UnparseableTimestamp { row: usize, value: String },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
