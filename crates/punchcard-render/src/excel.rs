//! Excel daily report renderer
//!
//! Writes the daily summary table to a single worksheet (named `daily` by
//! default): one bold header row, then one row per summary.
//!
//! Column formatting comes from the header via [`crate::columns`]:
//! - Text columns store every cell as a string with the `@` format
//! - Money columns put `#,##0.00` on numeric cells
//! - Plain columns get width only
//!
//! Dates, times and date-times outside text columns are real Excel date
//! values carrying `yyyy-mm-dd`, `hh:mm:ss` or `yyyy-mm-dd hh:mm:ss`.
//!
//! ## Example Output
//!
//! ```text
//! Sheet: daily
//! | person_id | person_name | punch_date | punch_count | first_punch | last_punch | in_to_out_time |
//! |-----------|-------------|------------|-------------|-------------|------------|----------------|
//! | 1         | Alice       | 2024-01-01 | 2           | 08:00:00    | 17:30:00   | 09:30:00       |
//! | 2         | Bob         | 2024-01-01 | 1           | 09:00:00    | 09:00:00   | 00:00:00       |
//! ```

use crate::columns::{classify_column, FormatKind};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use punchcard_core::{CellValue, DailyReport, RenderError, Renderer};
use rust_xlsxwriter::{ExcelDateTime, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::{debug, info};

/// Excel daily report renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Worksheet name
    pub sheet_name: String,
    /// Display width applied to every column
    pub column_width: f64,
    /// Whether header cells are bold with a thin border
    pub styled_header: bool,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            sheet_name: "daily".into(),
            column_width: 20.0,
            styled_header: true,
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set worksheet name
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Set column width
    pub fn column_width(mut self, width: f64) -> Self {
        self.column_width = width;
        self
    }

    /// Write header cells without styling
    pub fn plain_header(mut self) -> Self {
        self.styled_header = false;
        self
    }

    /// Generate workbook bytes for a daily report
    pub fn render_to_bytes(&self, report: &DailyReport) -> Result<Vec<u8>, RenderError> {
        self.render_table(report.columns(), report.rows())
    }

    /// Generate workbook bytes for any header + rows table
    pub fn render_table<H, I>(&self, headers: &[H], rows: I) -> Result<Vec<u8>, RenderError>
    where
        H: AsRef<str>,
        I: IntoIterator<Item = Vec<CellValue>>,
    {
        let mut workbook = Workbook::new();
        let formats = ReportFormats::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name).map_err(xlsx_error)?;

        let kinds: Vec<FormatKind> = headers.iter().map(|h| classify_column(h.as_ref())).collect();
        self.write_header(sheet, headers, &kinds, &formats)?;

        let mut row = 1u32;
        for cells in rows {
            if cells.len() > headers.len() {
                return Err(RenderError::InvalidData(format!(
                    "Row {} has {} cells but only {} columns",
                    row,
                    cells.len(),
                    headers.len()
                )));
            }
            for (col, (value, kind)) in cells.iter().zip(&kinds).enumerate() {
                write_cell(sheet, row, col as u16, value, *kind, &formats)?;
            }
            row += 1;
        }

        debug!(rows = row - 1, sheet = %self.sheet_name, "Rendered worksheet");

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    /// Render and write to `path`, replacing any existing file.
    ///
    /// The workbook is fully rendered before the file is touched, so a
    /// rendering failure never leaves a partial report behind.
    pub fn save(&self, report: &DailyReport, path: &Path) -> Result<(), RenderError> {
        let bytes = self.render_to_bytes(report)?;
        std::fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), rows = report.len(), "Report written");
        Ok(())
    }

    fn write_header<H: AsRef<str>>(
        &self,
        sheet: &mut Worksheet,
        headers: &[H],
        kinds: &[FormatKind],
        formats: &ReportFormats,
    ) -> Result<(), RenderError> {
        for (col, (header, kind)) in headers.iter().zip(kinds).enumerate() {
            let col = col as u16;
            if self.styled_header {
                sheet
                    .write_string_with_format(0, col, header.as_ref(), &formats.header)
                    .map_err(xlsx_error)?;
            } else {
                sheet.write_string(0, col, header.as_ref()).map_err(xlsx_error)?;
            }

            sheet
                .set_column_width(col, self.column_width)
                .map_err(xlsx_error)?;
            match kind {
                FormatKind::Text => {
                    sheet.set_column_format(col, &formats.text).map_err(xlsx_error)?;
                }
                FormatKind::Money => {
                    sheet.set_column_format(col, &formats.money).map_err(xlsx_error)?;
                }
                FormatKind::Plain => {}
            }
        }
        Ok(())
    }
}

/// Write one data cell according to its column's format kind
fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    kind: FormatKind,
    formats: &ReportFormats,
) -> Result<(), RenderError> {
    if matches!(value, CellValue::Empty) {
        return Ok(());
    }

    if kind == FormatKind::Text {
        sheet
            .write_string_with_format(row, col, value.to_string(), &formats.text)
            .map_err(xlsx_error)?;
        return Ok(());
    }

    match value {
        CellValue::Empty => {}
        CellValue::Int(_) | CellValue::Float(_) => {
            let n = value.as_f64().unwrap_or_default();
            if kind == FormatKind::Money {
                sheet
                    .write_number_with_format(row, col, n, &formats.money)
                    .map_err(xlsx_error)?;
            } else {
                sheet.write_number(row, col, n).map_err(xlsx_error)?;
            }
        }
        CellValue::Bool(b) => {
            sheet.write_boolean(row, col, *b).map_err(xlsx_error)?;
        }
        CellValue::Text(s) => {
            sheet.write_string(row, col, s).map_err(xlsx_error)?;
        }
        CellValue::Date(d) => {
            sheet
                .write_datetime_with_format(row, col, &excel_date(*d)?, &formats.date)
                .map_err(xlsx_error)?;
        }
        CellValue::Time(t) => {
            sheet
                .write_datetime_with_format(row, col, &excel_time(*t)?, &formats.time)
                .map_err(xlsx_error)?;
        }
        CellValue::DateTime(dt) => {
            sheet
                .write_datetime_with_format(row, col, &excel_datetime(*dt)?, &formats.datetime)
                .map_err(xlsx_error)?;
        }
    }
    Ok(())
}

fn seconds(t: NaiveTime) -> f64 {
    f64::from(t.second()) + f64::from(t.nanosecond()) / 1e9
}

fn excel_date(d: NaiveDate) -> Result<ExcelDateTime, RenderError> {
    let year = u16::try_from(d.year())
        .map_err(|_| RenderError::InvalidData(format!("Date out of Excel range: {d}")))?;
    ExcelDateTime::from_ymd(year, d.month() as u8, d.day() as u8).map_err(xlsx_error)
}

fn excel_time(t: NaiveTime) -> Result<ExcelDateTime, RenderError> {
    ExcelDateTime::from_hms(t.hour() as u16, t.minute() as u8, seconds(t)).map_err(xlsx_error)
}

fn excel_datetime(dt: NaiveDateTime) -> Result<ExcelDateTime, RenderError> {
    let t = dt.time();
    excel_date(dt.date())?
        .and_hms(t.hour() as u16, t.minute() as u8, seconds(t))
        .map_err(xlsx_error)
}

fn xlsx_error(e: XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}

/// Reusable cell formats
struct ReportFormats {
    header: Format,
    text: Format,
    money: Format,
    date: Format,
    time: Format,
    datetime: Format,
}

impl ReportFormats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold().set_border(FormatBorder::Thin),
            text: Format::new().set_num_format("@"),
            money: Format::new().set_num_format("#,##0.00"),
            date: Format::new().set_num_format("yyyy-mm-dd"),
            time: Format::new().set_num_format("hh:mm:ss"),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
        }
    }
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, report: &DailyReport) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(report)
    }
}
