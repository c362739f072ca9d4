//! Gap filling for understaffed shifts.
//!
//! Turns unsatisfied [`ValidationResult`]s into proposed shift records that
//! would bring each bucket up to its staff minimum. Proposals are advisory:
//! they are returned next to the report and never merged into the input.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::ScheduleConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, ShiftRecord, ValidationResult};

/// Proposes shifts that cover the staff shortfall of every unsatisfied result.
///
/// Results are processed in the order given. For each one, employees whose
/// role the unit prefers for the result's shift type are offered first, then
/// every other employee, both in the order of `employees`. An employee who
/// already starts a shift on that day, in `shifts` or in an earlier
/// proposal, is skipped. When the candidates run out the bucket stays short
/// and a warning is logged.
///
/// Proposed shifts take their clock times from the configured template,
/// the employee's department (or the unit's when the employee has none) and
/// the ID `generated-{date}-{shift type}-{employee ID}`. They are unpublished.
///
/// Only the staff minimum is filled. A bucket short on experience alone gets
/// no proposal.
///
/// # Errors
///
/// [`EngineError::InvalidConfig`] if a shortfall has to be filled for a
/// shift type without a template.
pub fn propose_fill_ins(
    results: &[ValidationResult],
    shifts: &[ShiftRecord],
    employees: &[Employee],
    config: &ScheduleConfig,
) -> EngineResult<Vec<ShiftRecord>> {
    let mut busy: HashMap<NaiveDate, HashSet<&str>> = HashMap::new();
    for shift in shifts {
        if let Some(employee_id) = shift.employee_id.as_deref() {
            busy.entry(shift.start_date()).or_default().insert(employee_id);
        }
    }

    let mut proposals = Vec::new();
    let mut unfilled = 0u32;

    for result in results.iter().filter(|result| !result.satisfied) {
        let needed = result.staff_shortfall();
        if needed == 0 {
            continue;
        }

        let template = config
            .template(result.shift_type)
            .ok_or_else(|| EngineError::InvalidConfig {
                message: format!("missing shift template for '{}'", result.shift_type),
            })?;
        let Some((start, end)) = template.times_on(result.date) else {
            warn!(
                date = %result.date,
                shift_type = %result.shift_type,
                "Shift template does not fit on date, leaving bucket short"
            );
            unfilled += needed;
            continue;
        };

        let (preferred, others): (Vec<&Employee>, Vec<&Employee>) =
            employees.iter().partition(|employee| {
                config.preferred_shift_type(&employee.role) == Some(result.shift_type)
            });

        let taken = busy.entry(result.date).or_default();
        let mut added = 0u32;
        for employee in preferred.into_iter().chain(others) {
            if added == needed {
                break;
            }
            if !taken.insert(employee.id.as_str()) {
                continue;
            }

            let department = employee
                .department
                .clone()
                .unwrap_or_else(|| config.unit().department.clone());
            let id = format!(
                "generated-{}-{}-{}",
                result.date, result.shift_type, employee.id
            );
            let shift = ShiftRecord::new(
                id,
                Some(employee.id.clone()),
                start,
                end,
                result.shift_type,
            )?
            .with_department(department);

            debug!(
                shift_id = %shift.id,
                employee_id = %employee.id,
                date = %result.date,
                shift_type = %result.shift_type,
                "Proposed fill-in shift"
            );
            proposals.push(shift);
            added += 1;
        }

        if added < needed {
            warn!(
                date = %result.date,
                shift_type = %result.shift_type,
                missing = needed - added,
                "Not enough free employees to reach staff minimum"
            );
            unfilled += needed - added;
        }
    }

    info!(
        proposed = proposals.len(),
        unfilled, "Fill-in proposals completed"
    );
    Ok(proposals)
}
