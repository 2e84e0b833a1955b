//! Weekly study-time allocation.
//!
//! Places study blocks for a set of subjects into a repeating weekly grid,
//! around fixed busy time, within per-subject weekly targets, and never
//! after a subject's exam.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Subject`, `TimeInterval`, `PlannerConfig`,
//!   `WeeklyPlan`, and the grid coordinate helpers
//! - **`scheduler`**: Busy-set ledger, demand estimation, the greedy
//!   `Allocator` and `PlanSummary`
//! - **`dispatching`**: Rules choosing the next subject when several compete
//! - **`validation`**: Configuration checks run before every allocation
//! - **`document`**: JSON configuration document (load/save)
//! - **`export`**: CSV rendering of a plan
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use study_planner::models::{PlannerConfig, Subject, TimeInterval};
//! use study_planner::scheduler::allocate;
//!
//! let config = PlannerConfig::new(vec![
//!     Subject::new("Linear Algebra", 4.0),
//!     Subject::new("Computer Architecture", 3.0),
//! ])
//! .with_day_window(18 * 60, 22 * 60, 30)
//! .with_busy(TimeInterval::busy(2, 18 * 60, 19 * 60, "Gym"));
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let plan = allocate(&config, start).unwrap();
//! assert!(plan.overlapping_pairs().is_empty());
//! ```
//!
//! # Logging
//!
//! Emits through the `log` facade; install any logger to see per-weekday
//! progress (`debug`) and individual placements (`trace`).

pub mod dispatching;
pub mod document;
pub mod error;
pub mod export;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{PlanError, Result};
pub use scheduler::{allocate, allocate_from_today, Allocator};
