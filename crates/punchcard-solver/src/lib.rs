//! # punchcard-solver
//!
//! Daily aggregation of raw punch-clock events.
//!
//! This crate provides:
//! - Required column lookup on normalized headers
//! - Combined timestamp derivation (`punch_date` + `attendance_record`)
//! - Grouping by (person_id, person_name, punch_date)
//! - First/last punch, punch count and in-to-out time per group
//!
//! ## Example
//!
//! ```rust
//! use punchcard_core::{CellValue, Summarizer, Table};
//! use punchcard_solver::DailySummarizer;
//!
//! let mut table = Table::new(vec![
//!     "Person Id".into(),
//!     "Person Name".into(),
//!     "Punch Date".into(),
//!     "Attendance Record".into(),
//! ]);
//! table.push_row(vec![CellValue::Int(1), "Alice".into(), "2024-01-01".into(), "08:00:00".into()]);
//! table.push_row(vec![CellValue::Int(1), "Alice".into(), "2024-01-01".into(), "17:30:00".into()]);
//!
//! let report = DailySummarizer::new().summarize(&table).unwrap();
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.summaries[0].in_to_out_time.to_string(), "09:30:00");
//! ```
//!
//! ## In-to-out wrap
//!
//! `in_to_out_time` is the elapsed span added to midnight, keeping only the
//! time of day. Spans of 24 hours or more lose their whole days. The real
//! span is kept in `DailySummary::elapsed` and each wrapped group is logged.

pub mod timestamp;

pub use timestamp::parse_timestamp;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use punchcard_core::{
    normalize_header, CellValue, DailyReport, DailySummary, PunchRecord, Summarizer, SummaryError,
    Table, ATTENDANCE_RECORD, PERSON_ID, PERSON_NAME, PUNCH_DATE,
};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Group key: (person_id, person_name, punch_date)
type GroupKey = (CellValue, CellValue, CellValue);

/// Running aggregate for one group
#[derive(Clone, Debug)]
struct Group {
    count: usize,
    min: NaiveDateTime,
    max: NaiveDateTime,
}

impl Group {
    fn new(ts: NaiveDateTime) -> Self {
        Self {
            count: 1,
            min: ts,
            max: ts,
        }
    }

    fn add(&mut self, ts: NaiveDateTime) {
        self.count += 1;
        self.min = self.min.min(ts);
        self.max = self.max.max(ts);
    }
}

/// Positions of the required columns
#[derive(Clone, Copy, Debug)]
struct Columns {
    person_id: usize,
    person_name: usize,
    punch_date: usize,
    attendance_record: usize,
}

impl Columns {
    fn locate(table: &Table) -> Result<Self, SummaryError> {
        let normalized: Vec<String> = table.headers.iter().map(|h| normalize_header(h)).collect();
        let find = |name: &str| {
            normalized
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SummaryError::MissingColumn(name.to_string()))
        };

        // Timestamp columns are needed first, so they are reported first
        let punch_date = find(PUNCH_DATE)?;
        let attendance_record = find(ATTENDANCE_RECORD)?;
        let person_id = find(PERSON_ID)?;
        let person_name = find(PERSON_NAME)?;

        Ok(Self {
            person_id,
            person_name,
            punch_date,
            attendance_record,
        })
    }
}

/// Per-person, per-day punch summarizer
#[derive(Clone, Copy, Debug, Default)]
pub struct DailySummarizer;

impl DailySummarizer {
    pub fn new() -> Self {
        Self
    }

    /// Derive punch records from a raw table.
    ///
    /// Every row must yield a timestamp; the first one that does not fails
    /// the whole table. A blank date or clock time never yields one.
    pub fn punch_records(&self, table: &Table) -> Result<Vec<PunchRecord>, SummaryError> {
        let cols = Columns::locate(table)?;
        let mut records = Vec::with_capacity(table.len());

        for row in 0..table.len() {
            let punch_date = table.cell(row, cols.punch_date);
            let attendance_record = table.cell(row, cols.attendance_record);

            let combined = format!("{punch_date} {attendance_record}");
            let full_timestamp = if punch_date.is_empty() || attendance_record.is_empty() {
                None
            } else {
                parse_timestamp(&combined)
            }
            .ok_or(SummaryError::UnparseableTimestamp {
                row: row + 1,
                value: combined,
            })?;

            records.push(PunchRecord {
                person_id: table.cell(row, cols.person_id).clone(),
                person_name: table.cell(row, cols.person_name).clone(),
                punch_date: punch_date.clone(),
                attendance_record: attendance_record.clone(),
                full_timestamp,
            });
        }

        Ok(records)
    }

    /// Group records and compute the daily summaries, sorted by
    /// (person_name, person_id, punch_date).
    ///
    /// Records with a blank person_id or person_name are left out of every
    /// group. A blank punch_date cannot get here: its timestamp fails first.
    pub fn aggregate(&self, records: Vec<PunchRecord>) -> DailyReport {
        let mut groups: BTreeMap<GroupKey, Group> = BTreeMap::new();
        let mut dropped = 0usize;

        for record in records {
            if record.person_id.is_empty() || record.person_name.is_empty() {
                dropped += 1;
                continue;
            }

            let ts = record.full_timestamp;
            groups
                .entry((record.person_id, record.person_name, record.punch_date))
                .and_modify(|g| g.add(ts))
                .or_insert_with(|| Group::new(ts));
        }

        if dropped > 0 {
            debug!(dropped, "Rows with blank person id or name excluded from grouping");
        }

        let mut summaries: Vec<DailySummary> = groups
            .into_iter()
            .map(|((person_id, person_name, punch_date), group)| {
                let elapsed = group.max - group.min;
                let summary = DailySummary {
                    person_id,
                    person_name,
                    punch_date,
                    punch_count: group.count,
                    first_punch: group.min.time(),
                    last_punch: group.max.time(),
                    in_to_out_time: time_of_day(elapsed),
                    elapsed,
                };
                if summary.is_wrapped() {
                    warn!(
                        person_id = %summary.person_id,
                        person_name = %summary.person_name,
                        punch_date = %summary.punch_date,
                        hours = elapsed.num_hours(),
                        "In-to-out span exceeds 24 hours; reported time of day wraps"
                    );
                }
                summary
            })
            .collect();

        summaries.sort_by(|a, b| {
            (&a.person_name, &a.person_id, &a.punch_date).cmp(&(
                &b.person_name,
                &b.person_id,
                &b.punch_date,
            ))
        });

        DailyReport::new(summaries)
    }
}

impl Summarizer for DailySummarizer {
    fn summarize(&self, table: &Table) -> Result<DailyReport, SummaryError> {
        let records = self.punch_records(table)?;
        let punches = records.len();
        let report = self.aggregate(records);
        info!(punches, groups = report.len(), "Summarized punches");
        Ok(report)
    }
}

/// Elapsed span as a wall-clock time: midnight plus the span, days discarded
pub fn time_of_day(elapsed: TimeDelta) -> NaiveTime {
    NaiveTime::MIN.overflowing_add_signed(elapsed).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(rows: &[(i64, &str, &str, &str)]) -> Table {
        let mut table = Table::new(vec![
            "Person Id".into(),
            "Person Name".into(),
            "Punch Date".into(),
            "Attendance Record".into(),
        ]);
        for (id, name, date, time) in rows {
            table.push_row(vec![
                CellValue::Int(*id),
                (*name).into(),
                (*date).into(),
                (*time).into(),
            ]);
        }
        table
    }

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn single_punch_has_zero_span() {
        let report = DailySummarizer::new()
            .summarize(&table(&[(2, "Bob", "2024-01-01", "09:00:00")]))
            .unwrap();
        let bob = &report.summaries[0];
        assert_eq!(bob.punch_count, 1);
        assert_eq!(bob.first_punch, hms(9, 0, 0));
        assert_eq!(bob.last_punch, hms(9, 0, 0));
        assert_eq!(bob.in_to_out_time, NaiveTime::MIN);
    }

    #[test]
    fn unordered_punches_use_min_and_max() {
        let report = DailySummarizer::new()
            .summarize(&table(&[
                (1, "Alice", "2024-01-01", "12:00:00"),
                (1, "Alice", "2024-01-01", "17:30:00"),
                (1, "Alice", "2024-01-01", "08:00:00"),
            ]))
            .unwrap();
        let alice = &report.summaries[0];
        assert_eq!(alice.punch_count, 3);
        assert_eq!(alice.first_punch, hms(8, 0, 0));
        assert_eq!(alice.last_punch, hms(17, 30, 0));
        assert_eq!(alice.in_to_out_time, hms(9, 30, 0));
        assert_eq!(alice.elapsed, TimeDelta::minutes(570));
    }

    #[test]
    fn missing_column_is_reported() {
        let mut t = table(&[(1, "Alice", "2024-01-01", "08:00:00")]);
        t.headers[3] = "Clock".into();
        let err = DailySummarizer::new().summarize(&t).unwrap_err();
        assert!(matches!(err, SummaryError::MissingColumn(ref c) if c == "attendance_record"));
    }

    #[test]
    fn headers_match_case_and_space_insensitively() {
        let mut t = table(&[(1, "Alice", "2024-01-01", "08:00:00")]);
        t.headers = vec![
            "PERSON ID".into(),
            "person name".into(),
            "Punch_Date".into(),
            "Attendance record".into(),
        ];
        assert!(DailySummarizer::new().summarize(&t).is_ok());
    }

    #[test]
    fn unparseable_timestamp_fails_with_row() {
        let err = DailySummarizer::new()
            .summarize(&table(&[
                (1, "Alice", "2024-01-01", "08:00:00"),
                (1, "Alice", "not a date", "08:00:00"),
            ]))
            .unwrap_err();
        match err {
            SummaryError::UnparseableTimestamp { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "not a date 08:00:00");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extra_columns_are_ignored() {
        let mut t = table(&[(1, "Alice", "2024-01-01", "08:00:00")]);
        t.headers.push("Department".into());
        t.rows[0].push("Sales".into());
        let report = DailySummarizer::new().summarize(&t).unwrap();
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn blank_person_keys_are_dropped() {
        let mut t = table(&[
            (1, "Alice", "2024-01-01", "08:00:00"),
            (2, "", "2024-01-01", "09:00:00"),
            (3, "Carol", "2024-01-01", "10:00:00"),
        ]);
        t.rows[2][0] = CellValue::Empty;

        let report = DailySummarizer::new().summarize(&t).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.summaries[0].person_name, CellValue::from("Alice"));
    }

    #[test]
    fn blank_punch_date_fails() {
        let mut t = table(&[(1, "Alice", "2024-01-01", "08:00:00")]);
        t.rows[0][2] = CellValue::Empty;

        let err = DailySummarizer::new().summarize(&t).unwrap_err();
        assert!(matches!(err, SummaryError::UnparseableTimestamp { row: 1, .. }));
    }

    #[test]
    fn blank_clock_time_fails_instead_of_punching_at_midnight() {
        let mut t = table(&[
            (1, "Amy", "2024-01-01", "17:00"),
            (1, "Amy", "2024-01-01", "08:00"),
        ]);
        t.rows[1][3] = CellValue::Empty;

        let err = DailySummarizer::new().summarize(&t).unwrap_err();
        match err {
            SummaryError::UnparseableTimestamp { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "2024-01-01 ");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn same_day_different_people_are_separate() {
        let report = DailySummarizer::new()
            .summarize(&table(&[
                (1, "Alice", "2024-01-01", "08:00:00"),
                (3, "Alice", "2024-01-01", "08:30:00"),
            ]))
            .unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report.summaries[0].person_id, CellValue::Int(1));
        assert_eq!(report.summaries[1].person_id, CellValue::Int(3));
    }

    #[test]
    fn time_of_day_wraps_at_24_hours() {
        assert_eq!(time_of_day(TimeDelta::hours(9)), hms(9, 0, 0));
        assert_eq!(time_of_day(TimeDelta::hours(24)), NaiveTime::MIN);
        assert_eq!(time_of_day(TimeDelta::hours(26)), hms(2, 0, 0));
    }
}
