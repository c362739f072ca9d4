//! Employee model.
//!
//! Staffing validation only needs an employee's identity and experience
//! level; the remaining fields mirror the stored profile.

use serde::{Deserialize, Serialize};

/// A member of a care-unit team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Professional role (e.g., "Sjuksköterska").
    #[serde(default)]
    pub role: String,
    /// Experience points counted towards a shift's minimum experience sum.
    #[serde(default)]
    pub experience_level: u32,
    /// Home department, if any.
    #[serde(default)]
    pub department: Option<String>,
}

impl Employee {
    /// Returns the employee's display name.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_roster::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     first_name: "Anna".to_string(),
    ///     last_name: "Andersson".to_string(),
    ///     role: "Sjuksköterska".to_string(),
    ///     experience_level: 3,
    ///     department: None,
    /// };
    /// assert_eq!(employee.full_name(), "Anna Andersson");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
