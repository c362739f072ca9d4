//! Staffing validation.
//!
//! Shifts are bucketed by (UTC start date, shift type) and each bucket is
//! compared with the rule for its shift type. The outcome is a list of
//! [`ValidationResult`]s; a shortfall is reported, never raised.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::EngineResult;
use crate::models::{
    Employee, SchedulingWindow, ShiftRecord, ShiftType, StaffingRule, ValidationResult,
};

#[derive(Debug, Default, Clone, Copy)]
struct BucketTotals {
    staff: u32,
    experience: u32,
}

/// Validates shifts against per-shift-type staffing rules.
///
/// One result is produced for every day that has at least one shift and
/// every shift type that has a rule, ordered by date and then shift type.
/// A configured shift type with no shifts on such a day is reported with
/// zero staff. Shift types without a rule impose no minimum and produce no
/// result. When `rules` contains several entries for one shift type the last
/// one wins.
///
/// Experience is the sum of `experience_level` of the employees assigned to
/// the bucket's shifts. Open slots and employees missing from `employees`
/// count as staff with zero experience.
///
/// # Errors
///
/// [`crate::error::EngineError::MalformedShiftRecord`] if a shift does not
/// start before it ends.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use shift_roster::calculation::validate_staffing;
/// use shift_roster::models::{ShiftRecord, ShiftType, StaffingRule};
///
/// let night = ShiftRecord::new(
///     "shift_001",
///     Some("emp_001".to_string()),
///     Utc.with_ymd_and_hms(2025, 8, 1, 22, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2025, 8, 2, 6, 0, 0).unwrap(),
///     ShiftType::Night,
/// )
/// .unwrap();
/// let rules = [StaffingRule {
///     shift_type: ShiftType::Night,
///     min_staff_count: 2,
///     min_experience_sum: 0,
/// }];
///
/// let results = validate_staffing(&[night], &rules, &[]).unwrap();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].actual_staff, 1);
/// assert!(!results[0].satisfied);
/// ```
pub fn validate_staffing(
    shifts: &[ShiftRecord],
    rules: &[StaffingRule],
    employees: &[Employee],
) -> EngineResult<Vec<ValidationResult>> {
    check_records(shifts)?;

    let days: BTreeSet<NaiveDate> = shifts.iter().map(ShiftRecord::start_date).collect();
    Ok(evaluate(shifts.iter(), days, rules, employees))
}

/// Validates the shifts of one scheduling window.
///
/// Shifts starting outside the window are ignored. Every day of
/// [`SchedulingWindow::period_days`] is checked, so a day without any shift
/// is reported as unstaffed for each configured shift type.
///
/// # Errors
///
/// [`crate::error::EngineError::MalformedShiftRecord`] if any shift does not
/// start before it ends, whether or not it falls inside the window.
pub fn validate_staffing_in_window(
    shifts: &[ShiftRecord],
    rules: &[StaffingRule],
    employees: &[Employee],
    window: &SchedulingWindow,
) -> EngineResult<Vec<ValidationResult>> {
    check_records(shifts)?;

    let in_window = shifts.iter().filter(|shift| window.contains_shift(shift));
    Ok(evaluate(in_window, window.period_days(), rules, employees))
}

fn check_records(shifts: &[ShiftRecord]) -> EngineResult<()> {
    shifts.iter().try_for_each(ShiftRecord::check_times)
}

fn evaluate<'a>(
    shifts: impl Iterator<Item = &'a ShiftRecord>,
    days: impl IntoIterator<Item = NaiveDate>,
    rules: &[StaffingRule],
    employees: &[Employee],
) -> Vec<ValidationResult> {
    let rules_by_type: BTreeMap<ShiftType, &StaffingRule> =
        rules.iter().map(|rule| (rule.shift_type, rule)).collect();
    let experience: HashMap<&str, u32> = employees
        .iter()
        .map(|employee| (employee.id.as_str(), employee.experience_level))
        .collect();

    let mut buckets: HashMap<(NaiveDate, ShiftType), BucketTotals> = HashMap::new();
    for shift in shifts {
        if !rules_by_type.contains_key(&shift.shift_type) {
            debug!(
                shift_id = %shift.id,
                shift_type = %shift.shift_type,
                "No staffing rule for shift type, skipping"
            );
            continue;
        }

        let totals = buckets
            .entry((shift.start_date(), shift.shift_type))
            .or_default();
        totals.staff += 1;
        totals.experience = totals
            .experience
            .saturating_add(experience_of(shift, &experience));
    }

    let mut results = Vec::new();
    let mut unsatisfied = 0usize;
    for day in days {
        for (shift_type, rule) in &rules_by_type {
            let totals = buckets
                .get(&(day, *shift_type))
                .copied()
                .unwrap_or_default();
            let result = ValidationResult::evaluate(day, rule, totals.staff, totals.experience);

            if !result.satisfied {
                unsatisfied += 1;
                debug!(
                    date = %day,
                    shift_type = %shift_type,
                    actual_staff = result.actual_staff,
                    required_staff = result.required_staff,
                    actual_experience = result.actual_experience,
                    required_experience = result.required_experience,
                    "Staffing below minimum"
                );
            }
            results.push(result);
        }
    }

    info!(
        buckets = results.len(),
        unsatisfied, "Staffing validation completed"
    );
    results
}

fn experience_of(shift: &ShiftRecord, experience: &HashMap<&str, u32>) -> u32 {
    let Some(employee_id) = shift.employee_id.as_deref() else {
        return 0;
    };

    match experience.get(employee_id) {
        Some(level) => *level,
        None => {
            warn!(
                shift_id = %shift.id,
                employee_id,
                "Employee not found, counting zero experience"
            );
            0
        }
    }
}
