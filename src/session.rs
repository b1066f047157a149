//! Simulation session: keeps the outcome pool in step with changing inputs
//!
//! The pool is expensive to draw, so it is regenerated only when the sample
//! size or the null hypothesis changes. Changing the number of simulations
//! re-truncates the existing pool, which keeps the first `k` outcomes stable
//! as `k` grows. Every other input only affects the derived values.

use crate::config::{DisplayOptions, SimulationParams};
use crate::histogram::Histogram;
use crate::report::SimulationReport;
use crate::sampler::{Sampler, SamplerError};
use crate::stats::{DistributionStats, NullModel};
use crate::table::{build_table, SimulationRow};
use crate::threshold::{DecisionRule, EmpiricalPValue};

/// What an [`SimulationSession::update`] did to the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// A new pool was drawn
    Regenerated,
    /// The number of simulations changed; the existing pool was re-truncated
    Reselected,
    /// The selection is unchanged
    Unchanged,
}

/// Current inputs plus the outcome pool drawn for them
#[derive(Debug)]
pub struct SimulationSession {
    params: SimulationParams,
    sampler: Sampler,
    pool: Vec<u64>,
    selected: usize,
}

impl SimulationSession {
    /// Start a session with a full-size pool
    pub fn new(params: SimulationParams) -> Result<Self, SamplerError> {
        Self::with_sampler(params, Sampler::new())
    }

    /// Start a session whose pool holds `capacity` outcomes
    pub fn with_capacity(params: SimulationParams, capacity: usize) -> Result<Self, SamplerError> {
        Self::with_sampler(params, Sampler::with_capacity(capacity)?)
    }

    fn with_sampler(params: SimulationParams, mut sampler: Sampler) -> Result<Self, SamplerError> {
        let pool = sampler.draw_pool(params.sample_size, params.null_hypothesis)?;
        let selected = select(&params, pool.len());
        tracing::debug!(selected, pool = pool.len(), "session started");

        Ok(Self {
            params,
            sampler,
            pool,
            selected,
        })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Apply new inputs
    ///
    /// On error the session keeps its previous inputs and pool.
    pub fn update(&mut self, params: SimulationParams) -> Result<Refresh, SamplerError> {
        let regenerate = params.needs_new_pool(&self.params);
        if regenerate {
            self.pool = self
                .sampler
                .draw_pool(params.sample_size, params.null_hypothesis)?;
        }

        let selected = select(&params, self.pool.len());
        let refresh = if regenerate {
            Refresh::Regenerated
        } else if params.simulation_size != self.params.simulation_size {
            Refresh::Reselected
        } else {
            Refresh::Unchanged
        };

        tracing::debug!(?refresh, selected, "session updated");
        self.params = params;
        self.selected = selected;
        Ok(refresh)
    }

    /// Every outcome drawn for the current sample size and null hypothesis
    pub fn pool(&self) -> &[u64] {
        &self.pool
    }

    /// The first `simulation_size` outcomes of the pool
    pub fn selected(&self) -> &[u64] {
        &self.pool[..self.selected]
    }

    pub fn decision_rule(&self) -> DecisionRule {
        DecisionRule::from_params(&self.params)
    }

    pub fn p_value(&self) -> EmpiricalPValue {
        EmpiricalPValue::from_outcomes(self.selected(), &self.decision_rule())
    }

    pub fn distribution(&self) -> Option<DistributionStats> {
        DistributionStats::from_outcomes(self.selected())
    }

    pub fn null_model(&self) -> NullModel {
        NullModel::new(self.params.sample_size, self.params.null_hypothesis)
    }

    /// Overview and zoomed histograms of the selection
    pub fn histograms(&self, display: &DisplayOptions) -> Vec<Histogram> {
        Histogram::build_both(
            self.selected(),
            &self.params,
            &self.decision_rule(),
            display,
        )
    }

    pub fn table(&self) -> Vec<SimulationRow> {
        build_table(self.selected(), &self.params, &self.decision_rule())
    }

    /// Collect everything the writers need
    pub fn report(&self, display: &DisplayOptions, include_table: bool) -> SimulationReport {
        let rule = self.decision_rule();
        SimulationReport {
            params: self.params,
            display: *display,
            rule_text: rule.describe(),
            rule,
            p_value: self.p_value(),
            distribution: self.distribution(),
            null_model: self.null_model(),
            histograms: self.histograms(display),
            rows: include_table.then(|| self.table()),
            sweep: None,
        }
    }
}

/// Selection length for `params`, capped by the pool
fn select(params: &SimulationParams, pool_len: usize) -> usize {
    if params.simulation_size > pool_len {
        tracing::warn!(
            requested = params.simulation_size,
            pool = pool_len,
            "simulation size exceeds pool, selecting the whole pool"
        );
    }
    params.simulation_size.min(pool_len)
}
