//! Configuration validation.
//!
//! Checks a [`PlannerConfig`] before allocation. Detects:
//! - Empty or duplicate subject names
//! - Negative or non-finite weekly targets
//! - Inverted or zero block bounds
//! - Empty or out-of-day windows, zero slot length
//! - Malformed busy intervals
//!
//! Every issue is collected so callers can report them all at once.

use std::collections::HashSet;

use crate::models::grid::{DAYS_PER_WEEK, MINUTES_PER_DAY};
use crate::models::PlannerConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two subjects share a name.
    DuplicateSubject,
    /// A subject has an empty name.
    EmptySubjectName,
    /// Weekly target hours are negative or not a number.
    InvalidTargetHours,
    /// Block bounds are zero or inverted.
    InvalidBlockBounds,
    /// Day window is empty or extends past midnight.
    InvalidDayWindow,
    /// Slot length is zero.
    InvalidSlot,
    /// A busy interval has a bad weekday, bounds, or kind.
    InvalidBusyInterval,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a planner configuration.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &PlannerConfig) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for subject in &config.subjects {
        if subject.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySubjectName,
                "Subject with empty name",
            ));
        } else if !names.insert(subject.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSubject,
                format!("Duplicate subject name: {}", subject.name),
            ));
        }

        if !subject.weekly_target_hours.is_finite() || subject.weekly_target_hours < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTargetHours,
                format!(
                    "Subject '{}' has invalid weekly target hours: {}",
                    subject.name, subject.weekly_target_hours
                ),
            ));
        }
    }

    if config.min_block_minutes == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidBlockBounds,
            "Minimum block length must be positive",
        ));
    }
    if config.min_block_minutes > config.max_block_minutes {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidBlockBounds,
            format!(
                "Minimum block length {} exceeds maximum {}",
                config.min_block_minutes, config.max_block_minutes
            ),
        ));
    }

    if config.day_start_min >= config.day_end_min || config.day_end_min > MINUTES_PER_DAY {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDayWindow,
            format!(
                "Day window [{}, {}) is empty or exceeds {} minutes",
                config.day_start_min, config.day_end_min, MINUTES_PER_DAY
            ),
        ));
    }

    if config.slot_minutes == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSlot,
            "Slot length must be positive",
        ));
    }

    for (idx, busy) in config.busy_intervals.iter().enumerate() {
        let problem = if busy.weekday >= DAYS_PER_WEEK {
            Some(format!("weekday {} out of range", busy.weekday))
        } else if busy.start_min >= busy.end_min || busy.end_min > MINUTES_PER_DAY {
            Some(format!("bounds [{}, {}) invalid", busy.start_min, busy.end_min))
        } else if !busy.is_busy() {
            Some("not of busy kind".to_string())
        } else {
            None
        };
        if let Some(problem) = problem {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBusyInterval,
                format!("Busy interval #{idx} '{}': {problem}", busy.label),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
