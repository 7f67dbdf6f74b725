//! # punchcard-parser
//!
//! Readers for timekeeping exports.
//!
//! This crate provides:
//! - Delimited-text reader (.csv) with dataframe-style type inference
//! - Spreadsheet reader (.xlsx, .xlsm, .xlsb, .xls, .ods) via calamine
//! - Extension-based dispatch between the two
//!
//! ## Example
//!
//! ```rust,ignore
//! use punchcard_parser::read_file;
//!
//! let table = read_file(std::path::Path::new("attendance.csv"))?;
//! println!("{} punches", table.len());
//! ```

pub mod delimited;
pub mod spreadsheet;

use punchcard_core::Table;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Input reading error
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Workbook contains no worksheets")]
    NoSheets,

    #[error("No header row found")]
    Empty,
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Delimited text (.csv)
    Csv,
    /// Anything else is handed to the spreadsheet reader
    Spreadsheet,
}

/// Detect file format from extension
pub fn detect_format(path: &Path) -> FileFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => FileFormat::Csv,
        _ => FileFormat::Spreadsheet,
    }
}

/// Read a whole export into memory (auto-detects format)
pub fn read_file(path: &Path) -> Result<Table, ReadError> {
    let format = detect_format(path);
    info!(path = %path.display(), ?format, "Reading input");

    let table = match format {
        FileFormat::Csv => delimited::read_path(path)?,
        FileFormat::Spreadsheet => spreadsheet::read_path(path)?,
    };

    info!(
        columns = table.headers.len(),
        rows = table.len(),
        "Input loaded"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_detect_format_csv() {
        assert_eq!(detect_format(Path::new("punches.csv")), FileFormat::Csv);
    }

    #[test]
    fn test_detect_format_csv_uppercase() {
        assert_eq!(detect_format(Path::new("PUNCHES.CSV")), FileFormat::Csv);
    }

    #[test]
    fn test_detect_format_xlsx() {
        assert_eq!(
            detect_format(Path::new("punches.xlsx")),
            FileFormat::Spreadsheet
        );
    }

    #[test]
    fn test_detect_format_no_extension() {
        assert_eq!(detect_format(Path::new("punches")), FileFormat::Spreadsheet);
    }

    #[test]
    fn test_read_file_not_found() {
        let result = read_file(Path::new("/nonexistent/punches.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_file_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("punches.txt");
        std::fs::write(&path, "person_id,person_name\n1,Alice\n").unwrap();

        let result = read_file(&path);
        assert!(matches!(result, Err(ReadError::Spreadsheet(_))));
    }
}
