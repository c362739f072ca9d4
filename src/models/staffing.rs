//! Staffing rule and validation result models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ShiftType;

/// Minimum staffing required for one shift type on every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingRule {
    /// The shift type the rule applies to.
    pub shift_type: ShiftType,
    /// Minimum number of staff on the shift.
    pub min_staff_count: u32,
    /// Minimum sum of experience levels of the staff on the shift.
    pub min_experience_sum: u32,
}

/// Outcome of checking one (day, shift type) bucket against its rule.
///
/// A result with `satisfied == false` is a warning for the caller, not an
/// error; it never blocks schedule generation.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shift_roster::models::{ShiftType, StaffingRule, ValidationResult};
///
/// let rule = StaffingRule {
///     shift_type: ShiftType::Night,
///     min_staff_count: 2,
///     min_experience_sum: 0,
/// };
/// let result = ValidationResult::evaluate(
///     NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
///     &rule,
///     1,
///     3,
/// );
///
/// assert!(!result.satisfied);
/// assert_eq!(result.staff_shortfall(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// The calendar day of the bucket.
    pub date: NaiveDate,
    /// The shift type of the bucket.
    pub shift_type: ShiftType,
    /// Staff count required by the rule.
    pub required_staff: u32,
    /// Staff count found in the bucket.
    pub actual_staff: u32,
    /// Experience sum required by the rule.
    pub required_experience: u32,
    /// Experience sum found in the bucket.
    pub actual_experience: u32,
    /// Whether both minima are met.
    pub satisfied: bool,
}

impl ValidationResult {
    /// Builds the result for a bucket from its rule and observed totals.
    pub fn evaluate(
        date: NaiveDate,
        rule: &StaffingRule,
        actual_staff: u32,
        actual_experience: u32,
    ) -> Self {
        Self {
            date,
            shift_type: rule.shift_type,
            required_staff: rule.min_staff_count,
            actual_staff,
            required_experience: rule.min_experience_sum,
            actual_experience,
            satisfied: actual_staff >= rule.min_staff_count
                && actual_experience >= rule.min_experience_sum,
        }
    }

    /// Number of staff missing; zero when the staff minimum is met.
    pub fn staff_shortfall(&self) -> u32 {
        self.required_staff.saturating_sub(self.actual_staff)
    }

    /// Experience points missing; zero when the experience minimum is met.
    pub fn experience_shortfall(&self) -> u32 {
        self.required_experience
            .saturating_sub(self.actual_experience)
    }
}
