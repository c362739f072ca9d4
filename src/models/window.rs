//! Scheduling window model.
//!
//! A [`SchedulingWindow`] is the half-open UTC interval used to select the
//! shifts of a reporting period by their start time.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calculation::days_in_month;
use crate::error::EngineError;

use super::ShiftRecord;

/// The length of a scheduling period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// A single calendar day.
    Day,
    /// An ISO week, Monday to Sunday.
    Week,
    /// A calendar month.
    Month,
}

impl Granularity {
    /// Returns the wire name of the granularity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            _ => Err(EngineError::UnsupportedGranularity {
                value: value.to_string(),
            }),
        }
    }
}

/// A half-open UTC interval `[start, end_exclusive)` covering one period.
///
/// For month windows `end_exclusive` extends past the end of the month by
/// the night-carryover window, so `end_exclusive` is not always the start of
/// the next period. Use [`SchedulingWindow::period_days`] for the days the
/// period itself covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingWindow {
    /// First instant of the window.
    pub start: DateTime<Utc>,
    /// First instant after the window.
    pub end_exclusive: DateTime<Utc>,
    /// The date the window was computed from.
    pub reference_date: NaiveDate,
    /// The length of the period.
    pub granularity: Granularity,
}

impl SchedulingWindow {
    /// Returns `start` as an ISO-8601 string with milliseconds, e.g. `2025-08-01T00:00:00.000Z`.
    pub fn start_iso(&self) -> String {
        format_iso(self.start)
    }

    /// Returns `end_exclusive` as an ISO-8601 string with milliseconds.
    pub fn end_iso_exclusive(&self) -> String {
        format_iso(self.end_exclusive)
    }

    /// Returns true if `instant` lies in `[start, end_exclusive)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end_exclusive
    }

    /// Returns true if the shift starts inside the window.
    pub fn contains_shift(&self, shift: &ShiftRecord) -> bool {
        self.contains(shift.start_time)
    }

    /// Returns the calendar days of the period, carryover excluded.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_roster::calculation::{WindowPolicy, compute_window};
    ///
    /// let window = compute_window("2024-02-10", "month", 0, &WindowPolicy::default()).unwrap();
    /// let days = window.period_days();
    /// assert_eq!(days.len(), 29);
    /// assert_eq!(days.last().unwrap().to_string(), "2024-02-29");
    /// ```
    pub fn period_days(&self) -> Vec<NaiveDate> {
        let first = self.start.date_naive();
        let count = match self.granularity {
            Granularity::Day => 1,
            Granularity::Week => 7,
            Granularity::Month => days_in_month(first.year(), first.month()),
        };
        (0..i64::from(count))
            .filter_map(|offset| first.checked_add_signed(Duration::days(offset)))
            .collect()
    }
}

fn format_iso(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
