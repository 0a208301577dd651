use common::models::{BaseFunding, RebalancePreview};
use serde::Serialize;

use crate::engine::{AllocationChange, ChartSlice, derive_changes, normalize, stability_score};

/// Everything the rebalance page renders for one preview.
///
/// Built from scratch for every preview; nothing is carried over from the previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebalanceReport {
    pub current_chart: Vec<ChartSlice>,
    pub suggested_chart: Vec<ChartSlice>,
    pub changes: Vec<AllocationChange>,
    pub current_stability: u8,
    pub suggested_stability: u8,
    pub base: String,
    pub sell_count: usize,
    pub buy_count: usize,
    pub base_funding: BaseFunding,
    pub base_pool_start: f64,
    pub base_needed_for_buys: f64,
    pub base_pool_end: f64,
    pub shortfall: f64,
    pub warnings: Vec<String>,
    pub rationale: Option<String>,
}

impl RebalanceReport {
    pub fn build(preview: &RebalancePreview) -> Self {
        let plan = &preview.swap_plan;

        Self {
            current_chart: normalize(&preview.current),
            suggested_chart: normalize(&preview.suggested),
            changes: derive_changes(&preview.current, &preview.suggested, plan),
            current_stability: stability_score(&preview.current),
            suggested_stability: stability_score(&preview.suggested),
            base: plan.base.clone(),
            sell_count: plan.sells_to_base.len(),
            buy_count: plan.buys_from_base.len(),
            base_funding: plan.base_funding.clone(),
            base_pool_start: plan.base_pool_start,
            base_needed_for_buys: plan.base_needed_for_buys,
            base_pool_end: plan.base_pool_end,
            shortfall: plan.shortfall,
            warnings: plan.warnings.clone(),
            rationale: preview.rationale.clone(),
        }
    }

    /// Points of stability gained by moving to the suggested allocation; negative when it loses some.
    pub fn stability_gain(&self) -> i16 {
        i16::from(self.suggested_stability) - i16::from(self.current_stability)
    }

    pub fn has_shortfall(&self) -> bool {
        self.shortfall > 0.0
    }
}
