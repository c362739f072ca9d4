//! Schedule filtering.

use serde::{Deserialize, Serialize};

use crate::models::{ShiftRecord, ShiftType};

/// Which shifts to keep by publication state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    /// Keep every shift.
    #[default]
    All,
    /// Keep published shifts only.
    Published,
    /// Keep draft shifts only.
    Unpublished,
}

/// Criteria for narrowing a schedule. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftFilter {
    /// Only shifts assigned to this employee.
    pub employee_id: Option<String>,
    /// Only shifts of this department.
    pub department: Option<String>,
    /// Only shifts of this type.
    pub shift_type: Option<ShiftType>,
    /// Only shifts in this publication state.
    pub publication: PublicationStatus,
}

impl ShiftFilter {
    /// Returns true if `shift` satisfies every set criterion.
    pub fn matches(&self, shift: &ShiftRecord) -> bool {
        if let Some(employee_id) = &self.employee_id {
            if shift.employee_id.as_ref() != Some(employee_id) {
                return false;
            }
        }
        if let Some(department) = &self.department {
            if shift.department.as_ref() != Some(department) {
                return false;
            }
        }
        if let Some(shift_type) = self.shift_type {
            if shift.shift_type != shift_type {
                return false;
            }
        }
        match self.publication {
            PublicationStatus::All => true,
            PublicationStatus::Published => shift.is_published,
            PublicationStatus::Unpublished => !shift.is_published,
        }
    }

    /// Returns the number of criteria that are set.
    pub fn count_active(&self) -> usize {
        [
            self.employee_id.is_some(),
            self.department.is_some(),
            self.shift_type.is_some(),
            self.publication != PublicationStatus::All,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Returns the shifts matching `filter`, in their original order.
pub fn filter_shifts<'a>(shifts: &'a [ShiftRecord], filter: &ShiftFilter) -> Vec<&'a ShiftRecord> {
    shifts.iter().filter(|shift| filter.matches(shift)).collect()
}
