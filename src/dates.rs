//! Calendar-day helpers. The whole availability model works in UTC calendar
//! days; `NaiveDate` carries that invariant through the type system, so
//! normalization to UTC midnight happens exactly once, at parse time.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Parse a calendar day from `YYYY-MM-DD` or an RFC 3339 datetime.
/// Datetimes are converted to UTC first, then truncated to the day.
pub fn parse_day(input: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    None
}

/// Every day from `start` to `end` inclusive. Empty when `end < start`;
/// callers that need ordering enforced validate before calling.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// First and last day of a calendar month. `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

/// The last `n` months ending with the month containing `today`, oldest
/// first, as `(year, month)` pairs.
pub fn last_months(today: NaiveDate, n: u32) -> Vec<(i32, u32)> {
    let anchor = today.year() * 12 + today.month0() as i32;
    (0..n as i32)
        .rev()
        .map(|back| {
            let total = anchor - back;
            (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
        })
        .collect()
}

pub fn month_label(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn range_is_inclusive_and_one_day_apart() {
        let range = date_range(day("2025-06-09"), day("2025-06-11"));
        assert_eq!(range.len(), 3);
        assert_eq!(range[0], day("2025-06-09"));
        assert_eq!(range[2], day("2025-06-11"));
        for pair in range.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 1);
        }
    }

    #[test]
    fn single_day_range() {
        assert_eq!(date_range(day("2025-06-10"), day("2025-06-10")), vec![day("2025-06-10")]);
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(date_range(day("2025-06-11"), day("2025-06-10")).is_empty());
    }

    #[test]
    fn range_crosses_month_boundary() {
        let range = date_range(day("2025-01-30"), day("2025-02-02"));
        assert_eq!(range.len(), 4);
        assert_eq!(range[3], day("2025-02-02"));
    }

    #[test]
    fn parse_plain_day() {
        assert_eq!(parse_day("2025-06-10"), Some(day("2025-06-10")));
    }

    #[test]
    fn parse_normalizes_datetimes_to_utc_day() {
        // 23:30 at UTC-5 is already the next day in UTC.
        assert_eq!(parse_day("2025-06-10T23:30:00-05:00"), Some(day("2025-06-11")));
        assert_eq!(parse_day("2025-06-10T12:00:00Z"), Some(day("2025-06-10")));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_day("not-a-date"), None);
        assert_eq!(parse_day("2025-13-01"), None);
    }

    #[test]
    fn month_bounds_handles_leap_years_and_rollover() {
        assert_eq!(
            month_bounds(2024, 2),
            Some((day("2024-02-01"), day("2024-02-29")))
        );
        assert_eq!(
            month_bounds(2025, 12),
            Some((day("2025-12-01"), day("2025-12-31")))
        );
        assert_eq!(month_bounds(2025, 13), None);
        assert_eq!(month_bounds(2025, 0), None);
    }

    #[test]
    fn last_months_walks_back_across_years() {
        let months = last_months(day("2025-02-15"), 4);
        assert_eq!(months, vec![(2024, 11), (2024, 12), (2025, 1), (2025, 2)]);
    }

    #[test]
    fn month_label_pads() {
        assert_eq!(month_label(2025, 3), "2025-03");
    }
}
