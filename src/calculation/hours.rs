//! Per-employee hour totals and report assembly.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{EmployeeHours, ShiftRecord, ShiftType, StaffingReport, ValidationResult};

/// Totals hours and shift counts per employee.
///
/// Open slots are skipped. The result is sorted by employee ID.
pub fn summarize_hours(shifts: &[ShiftRecord]) -> Vec<EmployeeHours> {
    let mut totals: BTreeMap<&str, EmployeeHours> = BTreeMap::new();

    for shift in shifts {
        let Some(employee_id) = shift.employee_id.as_deref() else {
            continue;
        };
        let entry = totals
            .entry(employee_id)
            .or_insert_with(|| EmployeeHours {
                employee_id: employee_id.to_string(),
                shift_count: 0,
                total_hours: Decimal::ZERO,
                night_shifts: 0,
                weekend_shifts: 0,
            });

        entry.shift_count += 1;
        entry.total_hours += shift.duration_hours();
        if shift.shift_type == ShiftType::Night {
            entry.night_shifts += 1;
        }
        if shift.is_weekend() {
            entry.weekend_shifts += 1;
        }
    }

    totals.into_values().collect()
}

/// Combines validation results with the hour totals of `shifts`.
pub fn build_report(results: Vec<ValidationResult>, shifts: &[ShiftRecord]) -> StaffingReport {
    let unsatisfied_count = results.iter().filter(|result| !result.satisfied).count();
    StaffingReport {
        results,
        unsatisfied_count,
        hours: summarize_hours(shifts),
        proposed_shifts: Vec::new(),
    }
}
