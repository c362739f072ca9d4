//! Configuration types for a care unit's schedule.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use crate::calculation::WindowPolicy;
use crate::error::EngineResult;
use crate::models::{ShiftType, StaffingRule};

/// Metadata about the care unit, from `unit.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitMetadata {
    /// Human-readable unit name.
    pub name: String,
    /// Department assigned to shifts that do not name one.
    pub department: String,
    /// Window calculation settings.
    pub window: WindowSettings,
    /// Shift type each professional role is preferred for when filling gaps.
    #[serde(default)]
    pub role_preferences: BTreeMap<String, ShiftType>,
}

/// Window calculation settings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WindowSettings {
    /// Minutes a month window extends past the end of the month.
    pub night_carryover_minutes: u32,
}

/// Minimums for one shift type, as written in `staffing.yaml`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StaffingLimits {
    /// Minimum number of assigned employees.
    pub min_staff: u32,
    /// Minimum sum of the assigned employees' experience levels.
    pub min_experience_sum: u32,
}

/// Staffing configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffingConfig {
    /// Minimums keyed by shift type. Types left out impose no minimum.
    pub staffing: BTreeMap<ShiftType, StaffingLimits>,
}

/// Clock times of one shift type, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ShiftTemplate {
    /// Start time of day.
    pub start: NaiveTime,
    /// End time of day. A time at or before `start` falls on the next day.
    pub end: NaiveTime,
}

impl ShiftTemplate {
    /// Returns the start and end instants of this shift when it starts on
    /// `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{NaiveDate, NaiveTime};
    /// use shift_roster::config::ShiftTemplate;
    ///
    /// let night = ShiftTemplate {
    ///     start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    /// };
    /// let date = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
    /// let (start, end) = night.times_on(date).unwrap();
    /// assert_eq!(start.to_rfc3339(), "2025-08-31T22:00:00+00:00");
    /// assert_eq!(end.to_rfc3339(), "2025-09-01T06:00:00+00:00");
    /// ```
    pub fn times_on(&self, date: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = date.and_time(self.start).and_utc();
        let end_date = if self.crosses_midnight() {
            date.succ_opt()?
        } else {
            date
        };
        let end = end_date.and_time(self.end).and_utc();
        Some((start, end))
    }

    /// Returns true if the shift ends on the day after it starts.
    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// Returns the part of the shift that falls after midnight.
    pub fn carryover(&self) -> Duration {
        if self.crosses_midnight() {
            self.end - NaiveTime::MIN
        } else {
            Duration::zero()
        }
    }

    /// Returns the length of the shift.
    pub fn duration(&self) -> Duration {
        if self.crosses_midnight() {
            Duration::days(1) - (self.start - self.end)
        } else {
            self.end - self.start
        }
    }
}

/// Shift templates configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftTemplatesConfig {
    /// Templates keyed by shift type.
    pub templates: BTreeMap<ShiftType, ShiftTemplate>,
}

/// The complete schedule configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    unit: UnitMetadata,
    staffing: BTreeMap<ShiftType, StaffingLimits>,
    templates: BTreeMap<ShiftType, ShiftTemplate>,
    window_policy: WindowPolicy,
}

impl ScheduleConfig {
    /// Creates a new ScheduleConfig from its component parts.
    ///
    /// Fails with [`crate::error::EngineError::InvalidConfig`] if the night
    /// carryover is a full day or more.
    pub fn new(
        unit: UnitMetadata,
        staffing: BTreeMap<ShiftType, StaffingLimits>,
        templates: BTreeMap<ShiftType, ShiftTemplate>,
    ) -> EngineResult<Self> {
        let window_policy =
            WindowPolicy::with_carryover_minutes(unit.window.night_carryover_minutes)?;
        Ok(Self {
            unit,
            staffing,
            templates,
            window_policy,
        })
    }

    /// Returns the unit metadata.
    pub fn unit(&self) -> &UnitMetadata {
        &self.unit
    }

    /// Returns the staffing rules, ordered by shift type.
    pub fn rules(&self) -> Vec<StaffingRule> {
        self.staffing
            .iter()
            .map(|(shift_type, limits)| StaffingRule {
                shift_type: *shift_type,
                min_staff_count: limits.min_staff,
                min_experience_sum: limits.min_experience_sum,
            })
            .collect()
    }

    /// Returns the staffing rule for `shift_type`, if one is configured.
    pub fn rule_for(&self, shift_type: ShiftType) -> Option<StaffingRule> {
        self.staffing.get(&shift_type).map(|limits| StaffingRule {
            shift_type,
            min_staff_count: limits.min_staff,
            min_experience_sum: limits.min_experience_sum,
        })
    }

    /// Returns the clock times of `shift_type`.
    pub fn template(&self, shift_type: ShiftType) -> Option<&ShiftTemplate> {
        self.templates.get(&shift_type)
    }

    /// Returns the window policy of the unit.
    pub fn window_policy(&self) -> WindowPolicy {
        self.window_policy
    }

    /// Returns the shift type `role` is preferred for, if any.
    pub fn preferred_shift_type(&self, role: &str) -> Option<ShiftType> {
        self.unit.role_preferences.get(role).copied()
    }
}
