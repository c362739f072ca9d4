//! Scheduling core for care-unit rosters
//!
//! This crate computes the UTC scheduling window of a reporting period and
//! validates a set of shifts against per-shift-type staffing minimums. Around
//! that core it loads a unit's schedule configuration from YAML, cleans up
//! candidate schedules and serves both calculations over HTTP.
//!
//! # Example
//!
//! ```
//! use shift_roster::calculation::{WindowPolicy, compute_window};
//!
//! let window = compute_window("2025-08-28", "month", 0, &WindowPolicy::default()).unwrap();
//! assert_eq!(window.start_iso(), "2025-08-01T00:00:00.000Z");
//! assert_eq!(window.end_iso_exclusive(), "2025-09-01T06:00:00.000Z");
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
