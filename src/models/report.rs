//! Staffing report models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ShiftRecord, ValidationResult};

/// Hours and shift counts worked by one employee in a set of shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeHours {
    /// The employee the totals belong to.
    pub employee_id: String,
    /// Number of shifts assigned.
    pub shift_count: u32,
    /// Total scheduled hours.
    pub total_hours: Decimal,
    /// Number of night shifts.
    pub night_shifts: u32,
    /// Number of shifts starting on a Saturday or Sunday.
    pub weekend_shifts: u32,
}

/// The advisory staffing report returned to reporting layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingReport {
    /// One entry per checked (day, shift type) bucket.
    pub results: Vec<ValidationResult>,
    /// Number of buckets below their rule.
    pub unsatisfied_count: usize,
    /// Per-employee totals, sorted by employee ID.
    pub hours: Vec<EmployeeHours>,
    /// Shifts proposed to cover staff shortfalls, when requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proposed_shifts: Vec<ShiftRecord>,
}

impl StaffingReport {
    /// Returns true if every bucket met its rule.
    pub fn is_fully_staffed(&self) -> bool {
        self.unsatisfied_count == 0
    }

    /// Returns the buckets that are below their rule.
    pub fn shortfalls(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|result| !result.satisfied)
    }
}
