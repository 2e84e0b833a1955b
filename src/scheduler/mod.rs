//! Allocation engine and plan metrics.
//!
//! # Pipeline
//!
//! Configuration → busy-set ledger + demand table → greedy allocator →
//! [`WeeklyPlan`](crate::models::WeeklyPlan).
//!
//! The allocator is a single-pass greedy heuristic: it fills each weekday
//! left to right, rotating among subjects that still need time. It is not
//! optimal, but it is deterministic and easy to explain.
//!
//! # Summary
//!
//! `PlanSummary` reports per-weekday load and per-subject fulfilment.

mod allocator;
pub mod demand;
pub mod ledger;
mod summary;

pub use allocator::{allocate, allocate_from_today, Allocator};
pub use demand::{demand_minutes, DemandTable, HorizonCalendar};
pub use ledger::{build_busy_slots, OccupancyLedger};
pub use summary::PlanSummary;
