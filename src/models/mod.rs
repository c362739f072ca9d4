//! Core data models for the roster engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod report;
mod shift;
mod staffing;
mod window;

pub use employee::Employee;
pub use report::{EmployeeHours, StaffingReport};
pub use shift::{ShiftRecord, ShiftRecordInput, ShiftType};
pub use staffing::{StaffingRule, ValidationResult};
pub use window::{Granularity, SchedulingWindow};
