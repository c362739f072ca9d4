//! Shift record model and related types.
//!
//! This module defines the [`ShiftType`] and [`ShiftRecord`] types used by
//! the window and staffing calculations, plus [`ShiftRecordInput`], the loose
//! shape in which records arrive from the persistence layer.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::calculation::parse_utc_timestamp;
use crate::error::{EngineError, EngineResult};

/// The kind of shift worked.
///
/// The set is closed so that a mistyped shift type is rejected when a record
/// is ingested instead of silently escaping staffing validation. Variants are
/// ordered by time of day.
///
/// # Example
///
/// ```
/// use shift_roster::models::ShiftType;
///
/// assert_eq!(ShiftType::from_name("Night"), Some(ShiftType::Night));
/// assert_eq!(ShiftType::from_name("graveyard"), None);
/// assert!(ShiftType::Day < ShiftType::Evening);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// Morning/day shift.
    Day,
    /// Afternoon/evening shift.
    Evening,
    /// Night shift, usually crossing midnight.
    Night,
}

impl ShiftType {
    /// All shift types in time-of-day order.
    pub const ALL: [ShiftType; 3] = [ShiftType::Day, ShiftType::Evening, ShiftType::Night];

    /// Returns the wire name of the shift type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Day => "day",
            ShiftType::Evening => "evening",
            ShiftType::Night => "night",
        }
    }

    /// Looks up a shift type by its wire name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|shift_type| shift_type.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shift assigned (or to be assigned) to an employee.
///
/// `start_time < end_time` always holds for records built through
/// [`ShiftRecord::new`] or [`ShiftRecord::try_from`]. `date` is the UTC
/// calendar date of `start_time`: a night shift from 22:00 to 06:00 belongs
/// to the day it starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee working the shift, or `None` for an open slot.
    pub employee_id: Option<String>,
    /// The start of the shift.
    pub start_time: DateTime<Utc>,
    /// The end of the shift.
    pub end_time: DateTime<Utc>,
    /// The kind of shift.
    pub shift_type: ShiftType,
    /// The calendar date the shift belongs to.
    pub date: NaiveDate,
    /// The department the shift is staffed for.
    #[serde(default)]
    pub department: Option<String>,
    /// Whether the shift has been published to staff.
    #[serde(default)]
    pub is_published: bool,
}

impl ShiftRecord {
    /// Creates an unpublished shift record, deriving `date` from `start_time`.
    ///
    /// Fails with [`EngineError::MalformedShiftRecord`] unless `start_time`
    /// is strictly before `end_time`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use shift_roster::models::{ShiftRecord, ShiftType};
    ///
    /// let shift = ShiftRecord::new(
    ///     "shift_001",
    ///     Some("emp_001".to_string()),
    ///     Utc.with_ymd_and_hms(2025, 8, 31, 22, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2025, 9, 1, 6, 0, 0).unwrap(),
    ///     ShiftType::Night,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(shift.date, NaiveDate::from_ymd_opt(2025, 8, 31).unwrap());
    /// assert!(shift.crosses_midnight());
    /// ```
    pub fn new(
        id: impl Into<String>,
        employee_id: Option<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        shift_type: ShiftType,
    ) -> EngineResult<Self> {
        let shift = Self {
            id: id.into(),
            employee_id,
            start_time,
            end_time,
            shift_type,
            date: start_time.date_naive(),
            department: None,
            is_published: false,
        };
        shift.check_times()?;
        Ok(shift)
    }

    /// Sets the department of the shift.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Sets the publication flag of the shift.
    pub fn with_published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    /// Returns the UTC calendar date on which the shift starts.
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    /// Returns the length of the shift in hours.
    pub fn duration_hours(&self) -> Decimal {
        let minutes = (self.end_time - self.start_time).num_minutes();
        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    }

    /// Returns true if the shift ends on a later UTC date than it starts.
    ///
    /// A shift ending exactly at midnight does not cross it.
    pub fn crosses_midnight(&self) -> bool {
        let last_instant = self.end_time - chrono::Duration::nanoseconds(1);
        last_instant.date_naive() > self.start_date()
    }

    /// Returns true if the shift starts on a Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.start_date().weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Checks the temporal invariant of the record.
    pub(crate) fn check_times(&self) -> EngineResult<()> {
        if self.start_time >= self.end_time {
            return Err(EngineError::MalformedShiftRecord {
                shift_id: self.id.clone(),
                message: format!(
                    "start_time {} is not before end_time {}",
                    self.start_time, self.end_time
                ),
            });
        }
        Ok(())
    }
}

/// A shift record as delivered by the persistence layer.
///
/// Every field is optional so that incomplete rows can be reported as
/// [`EngineError::MalformedShiftRecord`] instead of failing deserialization
/// of the whole batch. Timestamps are ISO-8601 strings parsed by
/// [`parse_utc_timestamp`]: an offset is converted to UTC and a timestamp
/// without an offset is read as UTC, the same rule reference dates follow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftRecordInput {
    /// Unique identifier; generated when absent.
    pub id: Option<String>,
    /// Assigned employee, if any.
    pub employee_id: Option<String>,
    /// Start timestamp.
    pub start_time: Option<String>,
    /// End timestamp.
    pub end_time: Option<String>,
    /// One of `day`, `evening`, `night`.
    pub shift_type: Option<String>,
    /// Stored calendar date; recomputed from `start_time`.
    pub date: Option<NaiveDate>,
    /// Department name.
    pub department: Option<String>,
    /// Publication flag; absent means unpublished.
    pub is_published: Option<bool>,
}

impl TryFrom<ShiftRecordInput> for ShiftRecord {
    type Error = EngineError;

    fn try_from(input: ShiftRecordInput) -> EngineResult<Self> {
        let shift_id = input
            .id
            .clone()
            .unwrap_or_else(|| format!("gen-{}", Uuid::new_v4()));

        let malformed = |message: String| EngineError::MalformedShiftRecord {
            shift_id: shift_id.clone(),
            message,
        };

        let start_time = match input.start_time.as_deref() {
            Some(raw) => parse_utc_timestamp(raw)
                .ok_or_else(|| malformed(format!("unparsable start_time '{}'", raw)))?,
            None => return Err(malformed("missing start_time".to_string())),
        };
        let end_time = match input.end_time.as_deref() {
            Some(raw) => parse_utc_timestamp(raw)
                .ok_or_else(|| malformed(format!("unparsable end_time '{}'", raw)))?,
            None => return Err(malformed("missing end_time".to_string())),
        };
        let shift_type = match input.shift_type.as_deref() {
            Some(raw) => ShiftType::from_name(raw)
                .ok_or_else(|| malformed(format!("unknown shift_type '{}'", raw)))?,
            None => return Err(malformed("missing shift_type".to_string())),
        };

        let mut shift = ShiftRecord::new(
            shift_id.clone(),
            input.employee_id,
            start_time,
            end_time,
            shift_type,
        )?;

        if let Some(stored) = input.date {
            if stored != shift.date {
                warn!(
                    shift_id = %shift.id,
                    stored_date = %stored,
                    start_date = %shift.date,
                    "Stored shift date disagrees with start_time, using start_time"
                );
            }
        }

        shift.department = input.department;
        shift.is_published = input.is_published.unwrap_or(false);
        Ok(shift)
    }
}
