//! UTC calendar arithmetic.
//!
//! Every helper here works on calendar fields of the proleptic Gregorian
//! calendar. Nothing reads a clock or a local timezone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Returns true if `year` is a leap year in the proleptic Gregorian calendar.
///
/// # Example
///
/// ```
/// use shift_roster::calculation::is_leap_year;
///
/// assert!(is_leap_year(2024));
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(!is_leap_year(2025));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns the number of days in `month` (1-12) of `year`, or 0 for an
/// out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Moves a (year, month) pair by `offset` months.
///
/// The month index wraps within 0-11 and the year absorbs the overflow in
/// either direction. Returns `None` if the resulting year does not fit.
pub fn shift_month(year: i32, month: u32, offset: i32) -> Option<(i32, u32)> {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(offset);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    Some((year, month))
}

/// Returns the Monday of the ISO week containing `date`.
pub fn iso_week_monday(date: NaiveDate) -> Option<NaiveDate> {
    let days_since_monday = i64::from(date.weekday().num_days_from_monday());
    date.checked_sub_signed(Duration::days(days_since_monday))
}

/// Returns `00:00:00.000Z` of `date`.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Parses an ISO-8601 timestamp into UTC.
///
/// Accepts RFC 3339 with an offset, which is converted to UTC, or a
/// timestamp without an offset (`YYYY-MM-DDTHH:MM:SS[.fff]`), which is read
/// as UTC. Shift times and reference dates share this rule.
///
/// # Example
///
/// ```
/// use shift_roster::calculation::parse_utc_timestamp;
///
/// let with_offset = parse_utc_timestamp("2025-09-01T01:30:00+02:00").unwrap();
/// let without = parse_utc_timestamp("2025-08-31T23:30:00").unwrap();
/// assert_eq!(with_offset, without);
/// assert!(parse_utc_timestamp("31/08/2025 23:30").is_none());
/// ```
pub fn parse_utc_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
