//! # punchcard-render
//!
//! Rendering backends for punchcard daily reports.
//!
//! This crate provides:
//! - Excel workbook output (`ExcelRenderer`)
//! - Header-driven column format rules (`columns`)
//! - Report file naming
//!
//! ## Example
//!
//! ```rust,ignore
//! use punchcard_core::Renderer;
//! use punchcard_render::{report_file_name, ExcelRenderer};
//!
//! let xlsx_bytes = ExcelRenderer::new().render(&report)?;
//! std::fs::write(report_file_name(today), xlsx_bytes)?;
//! ```

pub mod columns;
pub mod excel;

pub use columns::{classify_column, ColumnRule, FormatKind, COLUMN_RULES};
pub use excel::ExcelRenderer;

use chrono::NaiveDate;

/// File name of the report produced on `date`: `report_YYYY-MM-DD.xlsx`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("report_{}.xlsx", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(report_file_name(date), "report_2024-03-07.xlsx");
    }
}
