//! Scheduling calculations.
//!
//! This module contains the pure functions of the roster engine: UTC
//! calendar helpers, scheduling window bucketing, staffing validation
//! against per-shift-type minimums, fill-in proposals for understaffed
//! shifts, schedule deduplication and filtering, and per-employee hour
//! totals.

mod adjust;
mod calendar;
mod dedup;
mod filter;
mod hours;
mod staffing;
mod window;

pub use adjust::propose_fill_ins;
pub use calendar::{
    days_in_month, is_leap_year, iso_week_monday, midnight_utc, parse_utc_timestamp, shift_month,
};
pub use dedup::deduplicate_shifts;
pub use filter::{PublicationStatus, ShiftFilter, filter_shifts};
pub use hours::{build_report, summarize_hours};
pub use staffing::{validate_staffing, validate_staffing_in_window};
pub use window::{
    DEFAULT_NIGHT_CARRYOVER_HOURS, WindowPolicy, compute_window, parse_reference_date, window_for,
};
