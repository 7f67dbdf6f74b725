//! Delimited-text (.csv) reader
//!
//! Every field arrives as text. Types are inferred per column, the way a
//! dataframe reader does it: a column is integer only when every non-missing
//! field is an integer, then float, then boolean, otherwise every field stays
//! text. Identifiers such as `007` therefore keep their leading zeros
//! whenever the column holds anything non-numeric.

use crate::ReadError;
use csv::StringRecord;
use punchcard_core::{CellValue, Table};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Fields read as missing values
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Type shared by every non-missing field of a column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ColumnType {
    Int,
    Float,
    Bool,
    Text,
}

impl ColumnType {
    /// Narrowest type that fits every field
    fn infer<'a>(fields: impl Iterator<Item = &'a str>) -> Self {
        let (mut int, mut float, mut boolean, mut seen) = (true, true, true, false);

        for field in fields.filter(|f| !is_missing(f)) {
            seen = true;
            int &= field.parse::<i64>().is_ok();
            float &= parse_float(field).is_some();
            boolean &= parse_bool(field).is_some();
        }

        match (seen, int, float, boolean) {
            (false, ..) => ColumnType::Text,
            (_, true, ..) => ColumnType::Int,
            (_, _, true, _) => ColumnType::Float,
            (_, _, _, true) => ColumnType::Bool,
            _ => ColumnType::Text,
        }
    }

    fn convert(self, field: &str) -> CellValue {
        if is_missing(field) {
            return CellValue::Empty;
        }
        let text = || CellValue::Text(field.to_string());
        match self {
            ColumnType::Int => field.parse().map_or_else(|_| text(), CellValue::Int),
            ColumnType::Float => parse_float(field).map_or_else(text, CellValue::Float),
            ColumnType::Bool => parse_bool(field).map_or_else(text, CellValue::Bool),
            ColumnType::Text => text(),
        }
    }
}

fn is_missing(field: &str) -> bool {
    NA_VALUES.contains(&field)
}

fn parse_float(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_bool(field: &str) -> Option<bool> {
    if field.eq_ignore_ascii_case("true") {
        Some(true)
    } else if field.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Read a CSV file; the first record is the header row
pub fn read_path(path: &Path) -> Result<Table, ReadError> {
    let file = std::fs::File::open(path)?;
    read(file)
}

/// Read CSV from any reader
pub fn read<R: Read>(input: R) -> Result<Table, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(ReadError::Empty);
    }

    let mut records: Vec<StringRecord> = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    if skipped > 0 {
        debug!(skipped, "Skipped blank CSV lines");
    }

    let width = records.iter().map(StringRecord::len).max().unwrap_or(0).max(headers.len());
    let types: Vec<ColumnType> = (0..width)
        .map(|col| ColumnType::infer(records.iter().filter_map(|r| r.get(col))))
        .collect();
    debug!(?types, "Inferred CSV column types");

    let mut table = Table::new(headers);
    for record in &records {
        table.push_row(
            record
                .iter()
                .zip(&types)
                .map(|(field, ty)| ty.convert(field))
                .collect(),
        );
    }

    Ok(table)
}
