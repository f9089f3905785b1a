//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Datetime layouts accepted in a header `date` field
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts accepted in a header `date` field
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a header date string into a calendar date.
///
/// Times and offsets are accepted but only the date part (in the offset the
/// string was written in) is kept.
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.date_naive());
    }

    None
}

/// Format a date with a chrono format string
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    date.format(format).to_string()
}

/// Human-friendly distance between `date` and `today` ("3 days ago")
pub fn relative_date(date: &NaiveDate, today: &NaiveDate) -> String {
    let days = today.signed_duration_since(*date).num_days();

    if days < 0 {
        return "in the future".to_string();
    }

    if days == 0 {
        "today".to_string()
    } else if days == 1 {
        "yesterday".to_string()
    } else if days < 30 {
        format!("{} days ago", days)
    } else if days < 365 {
        let months = days / 30;
        if months == 1 {
            "a month ago".to_string()
        } else {
            format!("{} months ago", months)
        }
    } else {
        let years = days / 365;
        if years == 1 {
            "a year ago".to_string()
        } else {
            format!("{} years ago", years)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(parse_date_string("2024-05-21"), Some(ymd(2024, 5, 21)));
        assert_eq!(parse_date_string("2024/05/21"), Some(ymd(2024, 5, 21)));
        assert_eq!(parse_date_string("  2024-05-21 "), Some(ymd(2024, 5, 21)));
    }

    #[test]
    fn test_parse_datetime_keeps_date() {
        assert_eq!(
            parse_date_string("2024-07-15 10:30:00"),
            Some(ymd(2024, 7, 15))
        );
        assert_eq!(
            parse_date_string("2024-07-15T23:59:59"),
            Some(ymd(2024, 7, 15))
        );
        assert_eq!(
            parse_date_string("2024-07-15T23:30:00+09:00"),
            Some(ymd(2024, 7, 15))
        );
        assert_eq!(
            parse_date_string("2024-07-15T08:00:00Z"),
            Some(ymd(2024, 7, 15))
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_date_string("yesterday"), None);
        assert_eq!(parse_date_string("2024-13-01"), None);
        assert_eq!(parse_date_string(""), None);
    }

    #[test]
    fn test_format_date() {
        let date = ymd(2024, 1, 15);
        assert_eq!(format_date(&date, "%Y-%m-%d"), "2024-01-15");
        assert_eq!(format_date(&date, "%B %d, %Y"), "January 15, 2024");
    }

    #[test]
    fn test_relative_date() {
        let today = ymd(2024, 11, 20);
        assert_eq!(relative_date(&today, &today), "today");
        assert_eq!(relative_date(&ymd(2024, 11, 19), &today), "yesterday");
        assert_eq!(relative_date(&ymd(2024, 11, 10), &today), "10 days ago");
        assert_eq!(relative_date(&ymd(2024, 7, 15), &today), "4 months ago");
        assert_eq!(relative_date(&ymd(2022, 11, 1), &today), "2 years ago");
        assert_eq!(relative_date(&ymd(2025, 1, 1), &today), "in the future");
    }
}
