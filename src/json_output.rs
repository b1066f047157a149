//! JSON output format for simulation reports

use crate::histogram::Histogram;
use crate::report::SimulationReport;
use crate::stats::{DistributionStats, NullModel};
use crate::sweep::SweepPoint;
use crate::table::SimulationRow;
use crate::threshold::Threshold;
use serde::Serialize;

/// Inputs the results were computed from
#[derive(Debug, Clone, Serialize)]
pub struct JsonParameters {
    pub sample_size: u64,
    pub observed_proportion: f64,
    pub null_hypothesis: f64,
    pub simulation_size: usize,
    pub test_type: String,
    pub variant: String,
}

/// Decision rule
#[derive(Debug, Clone, Serialize)]
pub struct JsonThreshold {
    /// Rule as text, e.g. "X ≤ 140 or X ≥ 160"
    pub rule: String,
    /// Threshold value(s), left before right
    pub values: Vec<f64>,
}

/// Empirical p-value
#[derive(Debug, Clone, Serialize)]
pub struct JsonPValue {
    pub count: usize,
    pub total: usize,
    pub value: f64,
    /// Value rounded to four decimals
    pub rounded: f64,
}

/// One histogram bin
#[derive(Debug, Clone, Serialize)]
pub struct JsonBin {
    pub value: u64,
    pub count: u64,
    pub rejected: bool,
}

/// One histogram view
#[derive(Debug, Clone, Serialize)]
pub struct JsonHistogram {
    pub view: String,
    pub lower: u64,
    pub upper: u64,
    pub y_limit: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cutoffs: Vec<f64>,
    pub bins: Vec<JsonBin>,
}

impl From<&Histogram> for JsonHistogram {
    fn from(hist: &Histogram) -> Self {
        Self {
            view: hist.view.as_str().to_string(),
            lower: hist.lower,
            upper: hist.upper,
            y_limit: hist.y_limit,
            cutoffs: hist.cutoffs.clone(),
            bins: hist
                .bins
                .iter()
                .map(|b| JsonBin {
                    value: b.value,
                    count: b.count,
                    rejected: b.rejected,
                })
                .collect(),
        }
    }
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub parameters: JsonParameters,
    pub threshold: JsonThreshold,
    pub p_value: JsonPValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionStats>,
    pub null_model: NullModel,
    /// Histograms (if --histogram enabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histograms: Option<Vec<JsonHistogram>>,
    /// Data table (if --table enabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<SimulationRow>>,
    /// p-value convergence (if --sweep given)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<Vec<SweepPoint>>,
}

impl JsonOutput {
    /// Build the JSON document for `report`
    pub fn from_report(report: &SimulationReport, include_histograms: bool) -> Self {
        let p = &report.params;
        let values = match report.rule.threshold {
            Threshold::OneSided { value } => vec![value],
            Threshold::TwoSided { left, right } => vec![left, right],
        };

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "hyposim-json-v1".to_string(),
            parameters: JsonParameters {
                sample_size: p.sample_size,
                observed_proportion: p.observed_proportion,
                null_hypothesis: p.null_hypothesis,
                simulation_size: p.simulation_size,
                test_type: p.test_type.as_str().to_string(),
                variant: p.variant.as_str().to_string(),
            },
            threshold: JsonThreshold {
                rule: report.rule_text.clone(),
                values,
            },
            p_value: JsonPValue {
                count: report.p_value.count,
                total: report.p_value.total,
                value: report.p_value.value,
                rounded: report.p_value.rounded(),
            },
            distribution: report.distribution.clone(),
            null_model: report.null_model,
            histograms: include_histograms
                .then(|| report.histograms.iter().map(JsonHistogram::from).collect()),
            table: report.rows.clone(),
            sweep: report.sweep.clone(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
