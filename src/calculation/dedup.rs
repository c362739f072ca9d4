//! Duplicate assignment removal.
//!
//! An employee works at most one shift per day. Candidate schedules coming
//! back from the optimizer, or merged with existing shifts, can contain
//! repeats or a second shift for the same person on the same day.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::{ShiftRecord, ShiftType};

/// Keeps the first shift of every employee on every day.
///
/// Later shifts of the same employee starting on the same UTC date are
/// dropped, whether they repeat the kept shift type or not. Open slots
/// (no employee) are always kept. The order of kept shifts is preserved.
///
/// # Example
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use shift_roster::calculation::deduplicate_shifts;
/// use shift_roster::models::{ShiftRecord, ShiftType};
///
/// let start = Utc.with_ymd_and_hms(2025, 8, 1, 6, 0, 0).unwrap();
/// let end = start + Duration::hours(8);
/// let day = ShiftRecord::new("a", Some("emp_001".into()), start, end, ShiftType::Day).unwrap();
/// let late = end + Duration::hours(8);
/// let evening =
///     ShiftRecord::new("b", Some("emp_001".into()), end, late, ShiftType::Evening).unwrap();
///
/// let kept = deduplicate_shifts(&[day, evening]);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].id, "a");
/// ```
pub fn deduplicate_shifts(shifts: &[ShiftRecord]) -> Vec<ShiftRecord> {
    let mut assigned: HashMap<(&str, NaiveDate), ShiftType> = HashMap::new();
    let mut kept = Vec::with_capacity(shifts.len());

    for shift in shifts {
        let Some(employee_id) = shift.employee_id.as_deref() else {
            kept.push(shift.clone());
            continue;
        };

        match assigned.entry((employee_id, shift.start_date())) {
            Entry::Occupied(existing) => {
                debug!(
                    shift_id = %shift.id,
                    employee_id,
                    date = %shift.start_date(),
                    kept_type = %existing.get(),
                    dropped_type = %shift.shift_type,
                    "Dropping second shift for employee on the same day"
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(shift.shift_type);
                kept.push(shift.clone());
            }
        }
    }

    if kept.len() < shifts.len() {
        info!(
            before = shifts.len(),
            after = kept.len(),
            "Removed duplicate shift assignments"
        );
    }
    kept
}
