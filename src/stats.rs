//! Summary statistics for the simulated sampling distribution

use serde::Serialize;

/// Summary of the selected outcomes (computed with Trueno)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionStats {
    pub count: usize,
    pub mean: f32,
    pub stddev: f32,
    pub min: f32,
    pub max: f32,
    pub p5: f32,
    pub median: f32, // P50
    pub p95: f32,
}

impl DistributionStats {
    /// Calculate summary statistics, `None` for an empty selection
    pub fn from_outcomes(outcomes: &[u64]) -> Option<Self> {
        if outcomes.is_empty() {
            return None;
        }

        // Outcomes never exceed the sample size ceiling, so f32 is exact
        let values: Vec<f32> = outcomes.iter().map(|&x| x as f32).collect();
        let v = trueno::Vector::from_slice(&values);

        let mean = v.mean().unwrap_or(0.0);
        let stddev = v.stddev().unwrap_or(0.0);
        let min = v.min().unwrap_or(0.0);
        let max = v.max().unwrap_or(0.0);

        // Trueno has no percentile function
        let mut sorted = values;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Some(Self {
            count: outcomes.len(),
            mean,
            stddev,
            min,
            max,
            p5: calculate_percentile(&sorted, 5.0),
            median: calculate_percentile(&sorted, 50.0),
            p95: calculate_percentile(&sorted, 95.0),
        })
    }
}

/// Linearly interpolated percentile of outcomes already sorted ascending
fn calculate_percentile(sorted_data: &[f32], percentile: f32) -> f32 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f32;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f32;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

/// Theoretical binomial(n, p0) moments under the null hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NullModel {
    pub mean: f64,
    pub stddev: f64,
}

impl NullModel {
    pub fn new(sample_size: u64, null_hypothesis: f64) -> Self {
        let n = sample_size as f64;
        Self {
            mean: n * null_hypothesis,
            stddev: (n * null_hypothesis * (1.0 - null_hypothesis)).sqrt(),
        }
    }
}
