//! Typed cell values read from timekeeping exports

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

/// A single cell of an input table.
///
/// CSV fields arrive as text and are type-inferred per column; spreadsheet
/// cells keep the type the workbook stored. The `Display` form is the canonical string used
/// when cells are concatenated into a timestamp or written as text.
#[derive(Clone, Debug)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Int(_) | CellValue::Float(_))
    }

    /// Numeric value, if the cell holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Ordering rank between variants; numbers share one rank
    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Int(_) | CellValue::Float(_) => 1,
            CellValue::Bool(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::Date(_) => 4,
            CellValue::Time(_) => 5,
            CellValue::DateTime(_) => 6,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{v}")
                }
            }
            CellValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Time(t) => write_time(f, *t),
            CellValue::DateTime(dt) => {
                if dt.time() == NaiveTime::MIN {
                    write!(f, "{}", dt.date().format("%Y-%m-%d"))
                } else {
                    write!(f, "{} ", dt.date().format("%Y-%m-%d"))?;
                    write_time(f, dt.time())
                }
            }
        }
    }
}

fn write_time(f: &mut fmt::Formatter<'_>, t: NaiveTime) -> fmt::Result {
    if t.nanosecond() == 0 {
        write!(f, "{}", t.format("%H:%M:%S"))
    } else {
        write!(f, "{}", t.format("%H:%M:%S%.f"))
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
                x.total_cmp(&y)
            }
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Time(a), CellValue::Time(b)) => a.cmp(b),
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveTime> for CellValue {
    fn from(t: NaiveTime) -> Self {
        CellValue::Time(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_canonical() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let time = NaiveTime::from_hms_opt(8, 5, 0).unwrap();

        assert_eq!(CellValue::Float(3.0).to_string(), "3");
        assert_eq!(CellValue::Float(3.25).to_string(), "3.25");
        assert_eq!(CellValue::Date(date).to_string(), "2024-01-01");
        assert_eq!(CellValue::Time(time).to_string(), "08:05:00");
        assert_eq!(
            CellValue::DateTime(date.and_time(NaiveTime::MIN)).to_string(),
            "2024-01-01"
        );
        assert_eq!(
            CellValue::DateTime(date.and_time(time)).to_string(),
            "2024-01-01 08:05:00"
        );
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn fractional_seconds_are_kept() {
        let time = NaiveTime::from_hms_milli_opt(8, 0, 0, 500).unwrap();
        assert_eq!(CellValue::Time(time).to_string(), "08:00:00.500");
    }

    #[test]
    fn numbers_compare_across_int_and_float() {
        assert_eq!(CellValue::Int(2), CellValue::Float(2.0));
        assert!(CellValue::Int(2) < CellValue::Float(2.5));
        assert!(CellValue::Float(10.0) > CellValue::Int(9));
    }

    #[test]
    fn variants_order_by_rank() {
        assert!(CellValue::Empty < CellValue::Int(0));
        assert!(CellValue::Int(100) < CellValue::from("a"));
        assert!(CellValue::from("Alice") < CellValue::from("Bob"));
    }
}
