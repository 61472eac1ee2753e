//! Calendar helpers shared by the store, the aggregator and the CLI.
//!
//! All windows are computed in local wall-clock time on naive values, so a
//! daylight-saving transition never moves a week boundary.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday};

use crate::error::{JournalError, Result};

/// Midnight at the start of `date`.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The last representable millisecond of `date` (23:59:59.999).
#[must_use]
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last_millisecond = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last_millisecond)
}

/// The Sunday on or before `date`.
#[must_use]
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Full English weekday name, as stored in an entry's `day` field.
#[must_use]
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Number of days in the given month, or `None` for an invalid month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(chrono::Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

/// Attach the local timezone to a naive wall-clock time.
///
/// Ambiguous times (clocks going back) resolve to the earlier instant; times
/// that do not exist (clocks going forward) are rejected.
pub fn local_from_naive(naive: NaiveDateTime) -> Result<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| JournalError::InvalidDate(format!("{naive} does not exist in the local timezone")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_week_is_sunday() {
        let wednesday = NaiveDate::from_ymd_opt(2025, 4, 30).expect("valid date");
        let sunday = start_of_week(wednesday);
        assert_eq!(sunday, NaiveDate::from_ymd_opt(2025, 4, 27).expect("valid date"));
        assert_eq!(start_of_week(sunday), sunday);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(2025, 12), Some(31));
        assert_eq!(days_in_month(2025, 13), None);
    }

    #[test]
    fn test_end_of_day_millisecond() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 3).expect("valid date");
        assert_eq!(end_of_day(date).to_string(), "2025-05-03 23:59:59.999");
    }
}
