//! Subject selection rules.
//!
//! When several subjects compete for the same free slot the allocator asks
//! a [`SelectionRule`] which one goes next. Rules are stateful (rotation
//! cursors) and are built fresh for every allocation run, so no state
//! leaks between runs.
//!
//! # Usage
//!
//! ```
//! use study_planner::dispatching::{SelectionContext, SelectionPolicy};
//! use study_planner::models::Subject;
//!
//! let subjects = vec![Subject::new("A", 2.0), Subject::new("B", 2.0)];
//! let mut rule = SelectionPolicy::StableRotation.build(subjects.len());
//! let ctx = SelectionContext::new(&subjects, 0);
//!
//! assert_eq!(rule.select(&[0, 1], &ctx), Some(0));
//! assert_eq!(rule.select(&[0, 1], &ctx), Some(1));
//! ```

mod context;
pub mod rules;

pub use context::SelectionContext;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Picks the next subject among the eligible ones.
///
/// # Contract
/// `eligible` holds subject indices in ascending order. A rule must return
/// one of them, or `None` only when `eligible` is empty.
pub trait SelectionRule: Debug {
    /// Rule name (e.g., "stable_rotation").
    fn name(&self) -> &'static str;

    /// Selects a subject index from `eligible`.
    fn select(&mut self, eligible: &[usize], context: &SelectionContext<'_>) -> Option<usize>;
}

/// Which selection rule an allocation run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// One counter shared across all weekdays, taken modulo the size of the
    /// eligible set at call time. Rotation order drifts as subjects drop out.
    SharedCursor,
    /// Rotation over the configured subject order, skipping ineligible
    /// subjects in place.
    #[default]
    StableRotation,
    /// Highest `priority × exam urgency` first; ties go to configuration order.
    Urgency,
}

impl SelectionPolicy {
    /// Builds a fresh rule for a run over `subject_count` subjects.
    pub fn build(self, subject_count: usize) -> Box<dyn SelectionRule> {
        match self {
            SelectionPolicy::SharedCursor => Box::new(rules::SharedCursor::new()),
            SelectionPolicy::StableRotation => Box::new(rules::StableRotation::new(subject_count)),
            SelectionPolicy::Urgency => Box::new(rules::Urgency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subject;

    #[test]
    fn test_build_names() {
        assert_eq!(SelectionPolicy::SharedCursor.build(2).name(), "shared_cursor");
        assert_eq!(SelectionPolicy::StableRotation.build(2).name(), "stable_rotation");
        assert_eq!(SelectionPolicy::Urgency.build(2).name(), "urgency");
    }

    #[test]
    fn test_policy_serde() {
        let p: SelectionPolicy = serde_json::from_str("\"shared_cursor\"").unwrap();
        assert_eq!(p, SelectionPolicy::SharedCursor);
        assert_eq!(
            serde_json::to_string(&SelectionPolicy::Urgency).unwrap(),
            "\"urgency\""
        );
    }

    #[test]
    fn test_empty_eligible_yields_none() {
        let subjects = vec![Subject::new("A", 1.0)];
        let ctx = SelectionContext::new(&subjects, 0);
        for policy in [
            SelectionPolicy::SharedCursor,
            SelectionPolicy::StableRotation,
            SelectionPolicy::Urgency,
        ] {
            assert_eq!(policy.build(1).select(&[], &ctx), None);
        }
    }
}
