//! Configuration loading for a care unit's schedule.
//!
//! This module loads staffing minimums, shift time templates and window
//! settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use shift_roster::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded unit: {}", config.unit().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ScheduleConfig, ShiftTemplate, ShiftTemplatesConfig, StaffingConfig, StaffingLimits,
    UnitMetadata, WindowSettings,
};
