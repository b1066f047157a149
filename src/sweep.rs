//! p-value convergence as the number of simulations grows
//!
//! Every point reuses the session pool, so point `k` is computed from the
//! same first outcomes as every smaller point.

use crate::config::clamp_simulation_size;
use crate::sampler::SamplerError;
use crate::session::SimulationSession;
use crate::threshold::EmpiricalPValue;
use serde::Serialize;

/// p-value for one simulation count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub simulation_size: usize,
    pub p_value: EmpiricalPValue,
}

/// Evaluate the p-value for each of `sizes`, then restore the original count
pub fn run_sweep(
    session: &mut SimulationSession,
    sizes: &[u64],
) -> Result<Vec<SweepPoint>, SamplerError> {
    let original = *session.params();
    let mut points = Vec::with_capacity(sizes.len());

    for &requested in sizes {
        let mut params = original;
        params.simulation_size = clamp_simulation_size(requested);
        session.update(params)?;
        points.push(SweepPoint {
            simulation_size: session.selected().len(),
            p_value: session.p_value(),
        });
    }

    session.update(original)?;
    Ok(points)
}
