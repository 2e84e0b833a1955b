//! JSON configuration document.
//!
//! The on-disk shape of a planner configuration. Block bounds and the day
//! window are given in hours here and converted to minutes by
//! [`ConfigDocument::into_config`].
//!
//! ```json
//! {
//!   "subjects": [{"name": "Algebra", "weekly_target_hours": 4.0, "exam_date": "2024-03-15"}],
//!   "planning_horizon_days": 7,
//!   "min_block_hours": 1.0,
//!   "max_block_hours": 2.0,
//!   "day_start_hour": 9.0,
//!   "day_end_hour": 21.0,
//!   "slot_minutes": 30,
//!   "busy_blocks": [{"weekday": 0, "start_min": 600, "end_min": 720, "label": "Lecture"}]
//! }
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dispatching::SelectionPolicy;
use crate::error::{PlanError, Result};
use crate::models::grid::hours_to_minutes;
use crate::models::{PlannerConfig, Subject, TimeInterval};
use crate::validation::{ValidationError, ValidationErrorKind};

/// A busy block as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyBlock {
    /// Weekday index (0 = Monday).
    pub weekday: u8,
    /// Start minute-of-day.
    pub start_min: u32,
    /// End minute-of-day (exclusive).
    pub end_min: u32,
    /// Reason shown in renderings.
    #[serde(default)]
    pub label: String,
}

/// Serialized planner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default = "defaults::horizon_days")]
    pub planning_horizon_days: u32,
    #[serde(default = "defaults::min_block_hours")]
    pub min_block_hours: f64,
    #[serde(default = "defaults::max_block_hours")]
    pub max_block_hours: f64,
    #[serde(default = "defaults::day_start_hour")]
    pub day_start_hour: f64,
    #[serde(default = "defaults::day_end_hour")]
    pub day_end_hour: f64,
    #[serde(default = "defaults::slot_minutes")]
    pub slot_minutes: u32,
    #[serde(default)]
    pub busy_blocks: Vec<BusyBlock>,
    #[serde(default)]
    pub selection: SelectionPolicy,
    #[serde(default = "defaults::allow_short_final_block")]
    pub allow_short_final_block: bool,
}

mod defaults {
    pub fn horizon_days() -> u32 {
        7
    }
    pub fn min_block_hours() -> f64 {
        1.0
    }
    pub fn max_block_hours() -> f64 {
        2.0
    }
    pub fn day_start_hour() -> f64 {
        8.0
    }
    pub fn day_end_hour() -> f64 {
        22.0
    }
    pub fn slot_minutes() -> u32 {
        30
    }
    pub fn allow_short_final_block() -> bool {
        true
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            subjects: Vec::new(),
            planning_horizon_days: defaults::horizon_days(),
            min_block_hours: defaults::min_block_hours(),
            max_block_hours: defaults::max_block_hours(),
            day_start_hour: defaults::day_start_hour(),
            day_end_hour: defaults::day_end_hour(),
            slot_minutes: defaults::slot_minutes(),
            busy_blocks: Vec::new(),
            selection: SelectionPolicy::default(),
            allow_short_final_block: defaults::allow_short_final_block(),
        }
    }
}

impl ConfigDocument {
    /// Parses a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Renders the document as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a document from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration document from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Writes the document to a file, replacing any existing content.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!("Saving configuration document to {}", path.display());
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Converts to a planner configuration.
    ///
    /// Hour values are rounded to whole minutes. Negative or non-finite
    /// hours are reported together as [`PlanError::InvalidConfig`]; all
    /// other checks happen when the configuration is allocated.
    pub fn into_config(self) -> Result<PlannerConfig> {
        let mut errors = Vec::new();
        let mut minutes = |field: &str, hours: f64, kind: ValidationErrorKind| {
            hours_to_minutes(hours).unwrap_or_else(|| {
                errors.push(ValidationError::new(
                    kind,
                    format!("{field} must be a non-negative number of hours, got {hours}"),
                ));
                0
            })
        };

        let min_block = minutes(
            "min_block_hours",
            self.min_block_hours,
            ValidationErrorKind::InvalidBlockBounds,
        );
        let max_block = minutes(
            "max_block_hours",
            self.max_block_hours,
            ValidationErrorKind::InvalidBlockBounds,
        );
        let day_start = minutes(
            "day_start_hour",
            self.day_start_hour,
            ValidationErrorKind::InvalidDayWindow,
        );
        let day_end = minutes(
            "day_end_hour",
            self.day_end_hour,
            ValidationErrorKind::InvalidDayWindow,
        );

        if !errors.is_empty() {
            return Err(PlanError::InvalidConfig(errors));
        }

        let busy_intervals = self
            .busy_blocks
            .into_iter()
            .map(|b| TimeInterval::busy(b.weekday, b.start_min, b.end_min, b.label))
            .collect();

        Ok(PlannerConfig {
            subjects: self.subjects,
            planning_horizon_days: self.planning_horizon_days,
            min_block_minutes: min_block,
            max_block_minutes: max_block,
            day_start_min: day_start,
            day_end_min: day_end,
            slot_minutes: self.slot_minutes,
            busy_intervals,
            selection: self.selection,
            allow_short_final_block: self.allow_short_final_block,
        })
    }
}

impl From<&PlannerConfig> for ConfigDocument {
    fn from(config: &PlannerConfig) -> Self {
        Self {
            subjects: config.subjects.clone(),
            planning_horizon_days: config.planning_horizon_days,
            min_block_hours: f64::from(config.min_block_minutes) / 60.0,
            max_block_hours: f64::from(config.max_block_minutes) / 60.0,
            day_start_hour: f64::from(config.day_start_min) / 60.0,
            day_end_hour: f64::from(config.day_end_min) / 60.0,
            slot_minutes: config.slot_minutes,
            busy_blocks: config
                .busy_intervals
                .iter()
                .map(|i| BusyBlock {
                    weekday: i.weekday,
                    start_min: i.start_min,
                    end_min: i.end_min,
                    label: i.label.clone(),
                })
                .collect(),
            selection: config.selection,
            allow_short_final_block: config.allow_short_final_block,
        }
    }
}
