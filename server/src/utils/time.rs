//! Date-range helpers for order queries and statistics.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Parse a `YYYY-MM-DD` day.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// First instant of the day, UTC.
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// First instant of the *next* day, UTC. Ranges are half-open
/// `[start, end_exclusive)`.
pub fn day_end_exclusive(day: NaiveDate) -> DateTime<Utc> {
    day_start(day) + Duration::days(1)
}

/// Default reporting window: the last `days` days including today.
pub fn last_days(days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = Utc::now().date_naive();
    (
        day_start(today - Duration::days(days - 1)),
        day_end_exclusive(today),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_day() {
        let day = parse_day("2025-03-09").unwrap();
        assert_eq!(day.to_string(), "2025-03-09");
        assert!(parse_day("09/03/2025").is_none());
    }

    #[test]
    fn day_range_is_half_open() {
        let day = parse_day("2025-03-09").unwrap();
        let start = day_start(day);
        let end = day_end_exclusive(day);
        assert_eq!(end - start, Duration::days(1));
        assert_eq!(start.to_rfc3339(), "2025-03-09T00:00:00+00:00");
    }

    #[test]
    fn last_days_spans_requested_window() {
        let (start, end) = last_days(7);
        assert_eq!(end - start, Duration::days(7));
    }
}
