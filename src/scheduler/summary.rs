//! Plan summary metrics.
//!
//! Aggregates a finished plan against the demand its configuration implied.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Study per weekday | Sum of study minutes on each weekday |
//! | Busy per weekday | Busy minutes inside the day window |
//! | Allocated per subject | Sum of the subject's study minutes |
//! | Demanded per subject | Minutes owed over the horizon |
//! | Unmet per subject | `max(0, demanded - allocated)` |
//! | Fulfilment rate | Total allocated / total demanded |

use std::collections::BTreeMap;

use super::demand::demand_minutes;
use super::ledger::OccupancyLedger;
use crate::models::grid::DAYS_PER_WEEK;
use crate::models::{PlannerConfig, WeeklyPlan};

/// Summary of a weekly plan. All durations are in minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    /// Study minutes per weekday (only weekdays with study).
    pub study_by_weekday: BTreeMap<u8, u32>,
    /// Busy minutes inside the day window per weekday (only weekdays with busy time).
    pub busy_by_weekday: BTreeMap<u8, u32>,
    /// Allocated minutes per subject (every configured subject).
    pub allocated_by_subject: BTreeMap<String, u32>,
    /// Demanded minutes per subject.
    pub demanded_by_subject: BTreeMap<String, u32>,
    /// Fraction of demanded minutes allocated (0.0..=1.0).
    pub fulfilment_rate: f64,
}

impl PlanSummary {
    /// Computes the summary of a plan produced from `config`.
    pub fn calculate(plan: &WeeklyPlan, config: &PlannerConfig) -> Self {
        let mut study_by_weekday = BTreeMap::new();
        for block in plan.study() {
            *study_by_weekday.entry(block.weekday).or_insert(0) += block.duration_min();
        }

        let busy: Vec<_> = plan.busy().cloned().collect();
        let ledger = OccupancyLedger::from_busy(config.window(), &busy);
        let busy_by_weekday = (0..DAYS_PER_WEEK)
            .map(|w| (w, ledger.occupied_minutes(w)))
            .filter(|&(_, minutes)| minutes > 0)
            .collect();

        let mut allocated_by_subject = BTreeMap::new();
        let mut demanded_by_subject = BTreeMap::new();
        for subject in &config.subjects {
            let demanded = demand_minutes(subject.weekly_target_hours, config.planning_horizon_days);
            demanded_by_subject.insert(
                subject.name.clone(),
                u32::try_from(demanded).unwrap_or(u32::MAX),
            );
            allocated_by_subject.insert(subject.name.clone(), plan.minutes_for_subject(&subject.name));
        }

        let total_demanded: u64 = demanded_by_subject.values().map(|&m| u64::from(m)).sum();
        let total_allocated: u64 = allocated_by_subject.values().map(|&m| u64::from(m)).sum();
        let fulfilment_rate = if total_demanded == 0 {
            1.0
        } else {
            (total_allocated as f64 / total_demanded as f64).min(1.0)
        };

        Self {
            study_by_weekday,
            busy_by_weekday,
            allocated_by_subject,
            demanded_by_subject,
            fulfilment_rate,
        }
    }

    /// Minutes still owed per subject (only subjects with a shortfall).
    pub fn unmet_by_subject(&self) -> BTreeMap<String, u32> {
        self.demanded_by_subject
            .iter()
            .filter_map(|(name, &demanded)| {
                let allocated = self.allocated_by_subject.get(name).copied().unwrap_or(0);
                let unmet = demanded.saturating_sub(allocated);
                (unmet > 0).then(|| (name.clone(), unmet))
            })
            .collect()
    }

    /// Whether every subject received its full demand.
    pub fn is_fully_allocated(&self) -> bool {
        self.unmet_by_subject().is_empty()
    }

    /// Total study minutes in the plan.
    pub fn total_study_minutes(&self) -> u32 {
        self.study_by_weekday.values().sum()
    }
}
