//! Spreadsheet reader (xlsx, xlsm, xlsb, xls, ods)
//!
//! Only the first worksheet is read. Its first row is the header row.
//! Date-formatted cells become dates, times or date-times depending on the
//! stored serial: a serial below one day is a time of day, an integral serial
//! is a plain date.

use crate::ReadError;
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use punchcard_core::{CellValue, Table};
use std::path::Path;
use tracing::debug;

/// Read the first worksheet of a workbook
pub fn read_path(path: &Path) -> Result<Table, ReadError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ReadError::Spreadsheet(format!("Failed to open workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ReadError::NoSheets)?;
    debug!(sheet = %sheet_name, "Reading worksheet");

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ReadError::Spreadsheet(format!("Failed to read sheet '{sheet_name}': {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(ReadError::Empty)?
        .iter()
        .map(|cell| convert_cell(cell).to_string())
        .collect();

    let mut table = Table::new(headers);
    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        table.push_row(cells);
    }

    Ok(table)
}

/// Map a calamine cell to a typed value
pub fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => from_serial(dt.as_f64(), dt.as_datetime()),
        Data::DateTimeIso(s) => from_iso(s),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn from_serial(serial: f64, datetime: Option<NaiveDateTime>) -> CellValue {
    let Some(datetime) = datetime else {
        return CellValue::Float(serial);
    };

    let time = time_of_serial(serial).unwrap_or_else(|| datetime.time());
    if serial < 1.0 {
        CellValue::Time(time)
    } else if serial.fract() == 0.0 {
        CellValue::Date(datetime.date())
    } else {
        CellValue::DateTime(datetime.date().and_time(time))
    }
}

/// Time of day held in the fractional part of a serial, to the millisecond
fn time_of_serial(serial: f64) -> Option<NaiveTime> {
    let ms = (serial.fract().abs() * 86_400_000.0).round() as u32;
    let ms = ms.min(86_399_999);
    NaiveTime::from_num_seconds_from_midnight_opt(ms / 1000, (ms % 1000) * 1_000_000)
}

fn from_iso(s: &str) -> CellValue {
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        CellValue::DateTime(dt)
    } else if let Ok(d) = s.parse::<NaiveDate>() {
        CellValue::Date(d)
    } else if let Ok(t) = s.parse::<NaiveTime>() {
        CellValue::Time(t)
    } else {
        CellValue::Text(s.to_string())
    }
}
