//! Scheduling window calculation.
//!
//! This module computes the half-open UTC interval of a day, ISO week or
//! calendar month. Callers use the interval as `start_time >= start` and
//! `start_time < end_exclusive` bounds when querying stored shifts.
//!
//! Month windows end at the first instant of the next month plus the
//! night-carryover window, so the night shift starting on the last day of
//! the month is always captured.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Granularity, SchedulingWindow};

use super::calendar::{iso_week_monday, midnight_utc, parse_utc_timestamp, shift_month};

/// Default night-carryover window in hours: night shifts end at 06:00.
pub const DEFAULT_NIGHT_CARRYOVER_HOURS: i64 = 6;

/// Minutes in a day; a carryover must stay below this.
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Settings that shape computed windows.
///
/// The night carryover must equal the longest supported shift's duration
/// past midnight. [`crate::config::ConfigLoader`] checks this against the
/// configured shift templates. The carryover is always at least zero and
/// shorter than one day, so every window ends after it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPolicy {
    night_carryover: Duration,
}

impl WindowPolicy {
    /// Creates a policy with the given carryover in minutes.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfig`] if `minutes` is a full day or more.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_roster::calculation::WindowPolicy;
    ///
    /// let policy = WindowPolicy::with_carryover_minutes(360).unwrap();
    /// assert_eq!(policy, WindowPolicy::default());
    /// assert!(WindowPolicy::with_carryover_minutes(24 * 60).is_err());
    /// ```
    pub fn with_carryover_minutes(minutes: u32) -> EngineResult<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "night carryover of {} minutes must be shorter than one day",
                    minutes
                ),
            });
        }
        Ok(Self {
            night_carryover: Duration::minutes(i64::from(minutes)),
        })
    }

    /// How far a month window extends into the following month.
    pub fn night_carryover(&self) -> Duration {
        self.night_carryover
    }
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            night_carryover: Duration::hours(DEFAULT_NIGHT_CARRYOVER_HOURS),
        }
    }
}

/// Parses a reference date into a UTC calendar date.
///
/// Accepts a plain `YYYY-MM-DD` date, or a timestamp in any form
/// [`parse_utc_timestamp`] accepts: an offset is converted to UTC before the
/// date is taken, and a timestamp without an offset is read as UTC.
///
/// # Example
///
/// ```
/// use shift_roster::calculation::parse_reference_date;
///
/// let date = parse_reference_date("2025-09-01T01:30:00+02:00").unwrap();
/// assert_eq!(date.to_string(), "2025-08-31");
/// let date = parse_reference_date("2025-08-28T10:00:00").unwrap();
/// assert_eq!(date.to_string(), "2025-08-28");
/// assert!(parse_reference_date("2025-02-30").is_err());
/// ```
pub fn parse_reference_date(input: &str) -> EngineResult<NaiveDate> {
    let trimmed = input.trim();

    let date_error = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => return Ok(date),
        Err(err) => err,
    };

    if let Some(instant) = parse_utc_timestamp(trimmed) {
        return Ok(instant.date_naive());
    }

    Err(EngineError::InvalidReferenceDate {
        input: input.to_string(),
        message: format!(
            "expected YYYY-MM-DD or an ISO-8601 timestamp ({})",
            date_error
        ),
    })
}

/// Computes the scheduling window for string inputs.
///
/// `offset` moves the window by whole periods (days, weeks or months).
///
/// # Errors
///
/// - [`EngineError::InvalidReferenceDate`] if `reference_date` cannot be
///   parsed or the window falls outside the representable calendar.
/// - [`EngineError::UnsupportedGranularity`] if `granularity` is not one of
///   `day`, `week`, `month`.
///
/// # Example
///
/// ```
/// use shift_roster::calculation::{WindowPolicy, compute_window};
///
/// let window = compute_window("2025-08-28", "month", 0, &WindowPolicy::default()).unwrap();
/// assert_eq!(window.start_iso(), "2025-08-01T00:00:00.000Z");
/// assert_eq!(window.end_iso_exclusive(), "2025-09-01T06:00:00.000Z");
/// ```
pub fn compute_window(
    reference_date: &str,
    granularity: &str,
    offset: i32,
    policy: &WindowPolicy,
) -> EngineResult<SchedulingWindow> {
    let reference_date = parse_reference_date(reference_date)?;
    let granularity: Granularity = granularity.parse()?;
    window_for(reference_date, granularity, offset, policy)
}

/// Computes the scheduling window for typed inputs.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shift_roster::calculation::{WindowPolicy, window_for};
/// use shift_roster::models::Granularity;
///
/// let reference = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
/// let window = window_for(reference, Granularity::Month, 1, &WindowPolicy::default()).unwrap();
/// assert_eq!(window.start_iso(), "2025-01-01T00:00:00.000Z");
/// ```
pub fn window_for(
    reference_date: NaiveDate,
    granularity: Granularity,
    offset: i32,
    policy: &WindowPolicy,
) -> EngineResult<SchedulingWindow> {
    let out_of_range = || EngineError::InvalidReferenceDate {
        input: reference_date.to_string(),
        message: format!(
            "{} window with offset {} is outside the supported calendar range",
            granularity, offset
        ),
    };

    let (first_day, next_period_day) = match granularity {
        Granularity::Day => {
            let day = reference_date
                .checked_add_signed(Duration::days(i64::from(offset)))
                .ok_or_else(out_of_range)?;
            (day, day.succ_opt().ok_or_else(out_of_range)?)
        }
        Granularity::Week => {
            let monday = iso_week_monday(reference_date)
                .and_then(|monday| monday.checked_add_signed(Duration::weeks(i64::from(offset))))
                .ok_or_else(out_of_range)?;
            let next_monday = monday
                .checked_add_signed(Duration::days(7))
                .ok_or_else(out_of_range)?;
            (monday, next_monday)
        }
        Granularity::Month => {
            let (year, month) = shift_month(reference_date.year(), reference_date.month(), offset)
                .ok_or_else(out_of_range)?;
            let (next_year, next_month) =
                shift_month(year, month, 1).ok_or_else(out_of_range)?;
            let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
            let next =
                NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(out_of_range)?;
            (first, next)
        }
    };

    let start = midnight_utc(first_day);
    let period_end = midnight_utc(next_period_day);
    let end_exclusive = match granularity {
        Granularity::Month => period_end
            .checked_add_signed(policy.night_carryover())
            .ok_or_else(out_of_range)?,
        Granularity::Day | Granularity::Week => period_end,
    };

    debug!(
        reference_date = %reference_date,
        granularity = %granularity,
        offset,
        start = %start,
        end_exclusive = %end_exclusive,
        "Computed scheduling window"
    );

    Ok(SchedulingWindow {
        start,
        end_exclusive,
        reference_date,
        granularity,
    })
}
