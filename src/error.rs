//! Error types for allocation runs and configuration documents.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for planner operations.
pub type Result<T> = std::result::Result<T, PlanError>;

/// Errors produced by the planner.
///
/// Configuration errors are detected before any placement happens, so a
/// failed call never yields a partial plan.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The configuration failed validation.
    #[error("Invalid configuration: {}", summarize(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// A selection rule produced no subject although subjects were eligible.
    #[error("Selection rule '{rule}' returned no eligible subject on weekday {weekday}")]
    SelectionFailed {
        /// Weekday being filled (0 = Monday).
        weekday: u8,
        /// Name of the rule.
        rule: &'static str,
    },

    /// The cursor walk did not terminate within its iteration cap.
    #[error("Cursor walk exceeded {iterations} iterations on weekday {weekday}")]
    IterationCapExceeded {
        /// Weekday being filled (0 = Monday).
        weekday: u8,
        /// Iterations performed when the cap fired.
        iterations: usize,
    },

    /// The configuration document could not be parsed or serialized.
    #[error("Configuration document error: {0}")]
    Document(#[from] serde_json::Error),

    /// Reading or writing a configuration document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlanError {
    /// Whether this error is an internal invariant violation rather than
    /// a problem with the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            PlanError::SelectionFailed { .. } | PlanError::IterationCapExceeded { .. }
        )
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
