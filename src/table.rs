//! Per-simulation data table

use crate::config::SimulationParams;
use crate::threshold::DecisionRule;
use serde::Serialize;

/// One simulated sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationRow {
    /// 1-based simulation number
    pub index: usize,
    /// Successes in the simulated sample
    pub successes: u64,
    /// `successes / n`
    pub proportion: f64,
    /// Whether the sample lies in the rejection region
    pub rejected: bool,
}

/// Build one row per selected outcome
pub fn build_table(
    outcomes: &[u64],
    params: &SimulationParams,
    rule: &DecisionRule,
) -> Vec<SimulationRow> {
    let n = params.sample_size.max(1) as f64;
    outcomes
        .iter()
        .enumerate()
        .map(|(i, &successes)| SimulationRow {
            index: i + 1,
            successes,
            proportion: successes as f64 / n,
            rejected: rule.rejects(successes as f64),
        })
        .collect()
}
