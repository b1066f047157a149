//! Aggregated simulation results consumed by the output writers

use crate::config::{DisplayOptions, SimulationParams};
use crate::histogram::{Histogram, HistogramView};
use crate::stats::{DistributionStats, NullModel};
use crate::sweep::SweepPoint;
use crate::table::SimulationRow;
use crate::threshold::{DecisionRule, EmpiricalPValue};

/// Everything computed for one set of inputs
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub params: SimulationParams,
    pub display: DisplayOptions,
    pub rule: DecisionRule,
    /// Decision rule as text, e.g. `X ≥ 160`
    pub rule_text: String,
    pub p_value: EmpiricalPValue,
    pub distribution: Option<DistributionStats>,
    pub null_model: NullModel,
    pub histograms: Vec<Histogram>,
    /// Data table, present only when requested
    pub rows: Option<Vec<SimulationRow>>,
    /// p-values for growing simulation counts, present only when requested
    pub sweep: Option<Vec<SweepPoint>>,
}

impl SimulationReport {
    pub fn histogram(&self, view: HistogramView) -> Option<&Histogram> {
        self.histograms.iter().find(|h| h.view == view)
    }
}
