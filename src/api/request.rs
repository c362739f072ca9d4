//! Request types for the roster engine API.
//!
//! This module defines the JSON request structures for the `/window` and
//! `/validate` endpoints.

use serde::{Deserialize, Serialize};

use crate::calculation::ShiftFilter;
use crate::error::EngineResult;
use crate::models::{Employee, ShiftRecord, ShiftRecordInput, StaffingRule};

/// Request body for the `/window` endpoint.
///
/// `granularity` stays a plain string so that an unsupported value is
/// reported as `UNSUPPORTED_GRANULARITY` rather than a JSON error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowRequest {
    /// Reference date, `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub reference_date: String,
    /// One of `day`, `week`, `month`.
    pub granularity: String,
    /// Number of periods to move from the one containing the reference date.
    #[serde(default)]
    pub offset: i32,
}

/// Request body for the `/validate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    /// Shift records in the persistence wire shape.
    pub shifts: Vec<ShiftRecordInput>,
    /// Employees referenced by the shifts.
    pub employees: Vec<Employee>,
    /// Staffing rules; the unit's configured rules when absent.
    #[serde(default)]
    pub rules: Option<Vec<StaffingRule>>,
    /// Restricts validation to one window and checks each of its days.
    #[serde(default)]
    pub period: Option<WindowRequest>,
    /// Narrows the schedule before validation.
    #[serde(default)]
    pub filter: ShiftFilter,
    /// Drops second shifts of an employee on the same day before validation.
    #[serde(default)]
    pub deduplicate: bool,
    /// Adds proposed fill-in shifts for every staff shortfall to the report.
    #[serde(default)]
    pub fill_gaps: bool,
}

impl ValidateRequest {
    /// Converts the wire records into shift records.
    ///
    /// Records without a department are assigned `default_department`.
    pub fn shift_records(&self, default_department: &str) -> EngineResult<Vec<ShiftRecord>> {
        self.shifts
            .iter()
            .cloned()
            .map(|mut input| {
                if input.department.is_none() {
                    input.department = Some(default_department.to_string());
                }
                ShiftRecord::try_from(input)
            })
            .collect()
    }
}
