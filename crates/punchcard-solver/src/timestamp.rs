//! Flexible date-time inference for combined punch strings
//!
//! Timekeeping exports disagree on how dates and clock times are written.
//! A combined `"<date> <time>"` string is tried against the shapes seen in
//! practice, most specific first. Slash dates are month-first, dot dates are
//! day-first. Both halves are required: a date with no clock time is not a
//! punch.

use chrono::NaiveDateTime;

/// Date-time layouts, tried in order
const DATETIME_FORMATS: &[&str] = &[
    // ISO, year-first
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S%.f",
    "%Y.%m.%d %H:%M",
    // Month-first
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m-%d-%Y %H:%M:%S%.f",
    "%m-%d-%Y %H:%M",
    // Day-first
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    // 12-hour clocks
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %I:%M:%S %p",
    "%Y/%m/%d %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d.%m.%Y %I:%M:%S %p",
    "%d.%m.%Y %I:%M %p",
    // Textual months
    "%d %b %Y %H:%M:%S%.f",
    "%d %b %Y %H:%M",
    "%b %d %Y %H:%M:%S%.f",
    "%b %d %Y %H:%M",
    "%d-%b-%Y %H:%M:%S%.f",
    "%d-%b-%Y %H:%M",
];

/// Parse a combined date and time string
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = collapse_whitespace(input);
    if input.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&input, fmt).ok())
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect(input: &str, expected: &str) {
        let parsed = parse_timestamp(input)
            .unwrap_or_else(|| panic!("'{input}' should parse"));
        assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), expected);
    }

    #[test]
    fn iso_date_and_time() {
        expect("2024-01-01 08:00:00", "2024-01-01 08:00:00");
        expect("2024-01-01 17:30", "2024-01-01 17:30:00");
        expect("2024-01-01T09:15:42", "2024-01-01 09:15:42");
    }

    #[test]
    fn fractional_seconds() {
        let parsed = parse_timestamp("2024-01-01 08:00:00.250").unwrap();
        assert_eq!(parsed.format("%H:%M:%S%.3f").to_string(), "08:00:00.250");
    }

    #[test]
    fn slash_dates_are_month_first() {
        expect("03/04/2024 08:00:00", "2024-03-04 08:00:00");
        expect("2024/03/04 08:00", "2024-03-04 08:00:00");
    }

    #[test]
    fn dot_dates_are_day_first() {
        expect("03.04.2024 08:00:00", "2024-04-03 08:00:00");
    }

    #[test]
    fn twelve_hour_clock() {
        expect("2024-01-01 5:30 PM", "2024-01-01 17:30:00");
        expect("01/02/2024 08:15:00 am", "2024-01-02 08:15:00");
    }

    #[test]
    fn textual_month() {
        expect("05 Jan 2024 07:45", "2024-01-05 07:45:00");
    }

    #[test]
    fn extra_whitespace_is_ignored() {
        expect("  2024-01-01   08:00:00 ", "2024-01-01 08:00:00");
    }

    #[test]
    fn missing_clock_time_fails() {
        assert!(parse_timestamp("2024-01-01 ").is_none());
        assert!(parse_timestamp("2024-01-01").is_none());
        assert!(parse_timestamp("03/04/2024").is_none());
        assert!(parse_timestamp(" 08:00:00").is_none());
    }

    #[test]
    fn garbage_fails() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday noon").is_none());
        assert!(parse_timestamp("2024-13-01 08:00:00").is_none());
        assert!(parse_timestamp("2024-01-01 25:00:00").is_none());
        assert!(parse_timestamp("2024-01-01 2024-01-01 08:00:00").is_none());
    }
}
