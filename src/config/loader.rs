//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a unit's
//! schedule configuration from YAML files.

use chrono::Duration;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::calculation::WindowPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftType, StaffingRule};

use super::types::{
    ScheduleConfig, ShiftTemplate, ShiftTemplatesConfig, StaffingConfig, UnitMetadata,
};

/// Loads and provides access to a unit's schedule configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── unit.yaml             # Unit metadata and window settings
/// ├── staffing.yaml         # Minimum staff and experience per shift type
/// └── shift_templates.yaml  # Clock times per shift type
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_roster::config::ConfigLoader;
/// use shift_roster::models::ShiftType;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Unit: {}", loader.unit().name);
///
/// if let Some(rule) = loader.rule_for(ShiftType::Night) {
///     println!("Night minimum: {}", rule.min_staff_count);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScheduleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or misses a required field
    /// - A shift type has no template or a zero-length template
    /// - The night carryover differs from the longest template part past midnight
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let unit = Self::load_yaml::<UnitMetadata>(&path.join("unit.yaml"))?;
        let staffing = Self::load_yaml::<StaffingConfig>(&path.join("staffing.yaml"))?;
        let templates =
            Self::load_yaml::<ShiftTemplatesConfig>(&path.join("shift_templates.yaml"))?;

        let config = ScheduleConfig::new(unit, staffing.staffing, templates.templates)?;
        Self::check(&config)?;

        info!(
            unit = %config.unit().name,
            rules = config.rules().len(),
            path = %path.display(),
            "Loaded schedule configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Checks the relations between files that YAML parsing cannot express.
    fn check(config: &ScheduleConfig) -> EngineResult<()> {
        let mut longest_carryover = Duration::zero();

        for shift_type in ShiftType::ALL {
            let template = config
                .template(shift_type)
                .ok_or_else(|| EngineError::InvalidConfig {
                    message: format!("missing shift template for '{}'", shift_type),
                })?;

            if template.start == template.end {
                return Err(EngineError::InvalidConfig {
                    message: format!("shift template for '{}' has zero length", shift_type),
                });
            }
            longest_carryover = longest_carryover.max(template.carryover());
        }

        let configured = config.window_policy().night_carryover();
        if configured != longest_carryover {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "night_carryover_minutes is {} but the longest shift runs {} minutes \
                     past midnight",
                    configured.num_minutes(),
                    longest_carryover.num_minutes()
                ),
            });
        }

        Ok(())
    }

    /// Returns the underlying schedule configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Returns the unit metadata.
    pub fn unit(&self) -> &UnitMetadata {
        self.config.unit()
    }

    /// Returns every configured staffing rule.
    pub fn rules(&self) -> Vec<StaffingRule> {
        self.config.rules()
    }

    /// Returns the staffing rule for a shift type, if one is configured.
    pub fn rule_for(&self, shift_type: ShiftType) -> Option<StaffingRule> {
        self.config.rule_for(shift_type)
    }

    /// Returns the clock times of a shift type.
    ///
    /// Every shift type has a template once loading succeeded.
    pub fn template(&self, shift_type: ShiftType) -> Option<&ShiftTemplate> {
        self.config.template(shift_type)
    }

    /// Returns the window policy of the unit.
    pub fn window_policy(&self) -> WindowPolicy {
        self.config.window_policy()
    }
}
