//! Planner domain models.
//!
//! Provides the data types an allocation run consumes and produces.
//!
//! | Type | Role |
//! |------|------|
//! | `Subject` | Something to study, with a weekly target and optional exam |
//! | `TimeInterval` | A busy or study range on one weekday |
//! | `PlannerConfig` | All inputs of one allocation run except the start date |
//! | `WeeklyPlan` | Ordered output: busy intervals, then study intervals |
//! | `DayWindow` | The daily window and its slot grid |

mod config;
pub mod grid;
mod interval;
mod plan;
mod subject;

pub use config::PlannerConfig;
pub use grid::DayWindow;
pub use interval::{IntervalKind, TimeInterval};
pub use plan::WeeklyPlan;
pub use subject::Subject;
