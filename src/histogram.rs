//! Histogram data for the simulated sampling distribution
//!
//! Two views are produced: an overview across every possible outcome `0..=n`
//! and a zoomed view around the observed range. Bins are one outcome wide and
//! carry the rejection flag of the decision rule, so a renderer only has to
//! colour bins and draw the cutoff markers.

use crate::config::{DisplayOptions, SimulationParams};
use crate::threshold::DecisionRule;
use serde::Serialize;

/// Which part of the outcome axis a histogram covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistogramView {
    /// Every possible outcome `0..=n` ("zoomed out")
    Overview,
    /// Observed minimum to maximum plus a margin ("zoomed in")
    Zoomed,
}

impl HistogramView {
    pub fn title(&self) -> &'static str {
        match self {
            HistogramView::Overview => "Zoomed out",
            HistogramView::Zoomed => "Zoomed in",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HistogramView::Overview => "overview",
            HistogramView::Zoomed => "zoomed",
        }
    }
}

/// Frequency of a single outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    /// Number of successes this bin represents
    pub value: u64,
    /// Simulations that produced `value`
    pub count: u64,
    /// Whether `value` lies in the rejection region
    pub rejected: bool,
}

/// Binned outcomes for one view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub view: HistogramView,
    /// First bin value
    pub lower: u64,
    /// Last bin value (inclusive)
    pub upper: u64,
    pub bins: Vec<HistogramBin>,
    /// Vertical axis limit, 10% above the tallest bin
    pub y_limit: f64,
    /// Cutoff marker positions; empty unless `show_threshold` is set
    pub cutoffs: Vec<f64>,
}

impl Histogram {
    /// Bin `outcomes` for `view`
    pub fn build(
        view: HistogramView,
        outcomes: &[u64],
        params: &SimulationParams,
        rule: &DecisionRule,
        display: &DisplayOptions,
    ) -> Self {
        let n = params.sample_size;
        let (lower, upper) = match (view, outcomes.iter().min(), outcomes.iter().max()) {
            (HistogramView::Zoomed, Some(&min), Some(&max)) => {
                let margin = params.variant.zoom_margin();
                (min.saturating_sub(margin), max.saturating_add(margin).min(n))
            }
            _ => (0, n),
        };

        let mut counts = vec![0u64; (upper - lower + 1) as usize];
        for &x in outcomes {
            if (lower..=upper).contains(&x) {
                counts[(x - lower) as usize] += 1;
            }
        }

        let bins: Vec<HistogramBin> = counts
            .into_iter()
            .enumerate()
            .map(|(offset, count)| {
                let value = lower + offset as u64;
                HistogramBin {
                    value,
                    count,
                    rejected: rule.rejects(value as f64),
                }
            })
            .collect();

        let tallest = bins.iter().map(|b| b.count).max().unwrap_or(0);
        let cutoffs = if display.show_threshold {
            rule.cutoff_lines()
        } else {
            Vec::new()
        };

        Self {
            view,
            lower,
            upper,
            bins,
            y_limit: 1.1 * tallest as f64,
            cutoffs,
        }
    }

    /// Build the overview and zoomed histograms
    pub fn build_both(
        outcomes: &[u64],
        params: &SimulationParams,
        rule: &DecisionRule,
        display: &DisplayOptions,
    ) -> Vec<Self> {
        [HistogramView::Overview, HistogramView::Zoomed]
            .into_iter()
            .map(|view| Self::build(view, outcomes, params, rule, display))
            .collect()
    }

    /// Number of simulations falling in rejected bins
    pub fn rejected_count(&self) -> u64 {
        self.bins.iter().filter(|b| b.rejected).map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Axis label for an outcome, either a count or a percentage of `n`
pub fn axis_label(value: f64, sample_size: u64, use_proportions: bool) -> String {
    if use_proportions && sample_size > 0 {
        format!("{:.1}%", value / sample_size as f64 * 100.0)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TestType, Variant};

    fn params() -> SimulationParams {
        SimulationParams {
            sample_size: 20,
            observed_proportion: 0.5,
            null_hypothesis: 0.4,
            simulation_size: 8,
            test_type: TestType::Right,
            variant: Variant::Revised,
        }
    }

    #[test]
    fn test_overview_spans_all_outcomes() {
        let p = params();
        let rule = DecisionRule::from_params(&p);
        let hist = Histogram::build(
            HistogramView::Overview,
            &[8, 8, 9, 10, 12],
            &p,
            &rule,
            &DisplayOptions::default(),
        );
        assert_eq!(hist.lower, 0);
        assert_eq!(hist.upper, 20);
        assert_eq!(hist.bins.len(), 21);
        assert_eq!(hist.bins[8].count, 2);
        assert_eq!(hist.max_count(), 2);
        assert!((hist.y_limit - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_zoomed_view_clamped_to_sample_size() {
        let p = params();
        let rule = DecisionRule::from_params(&p);
        let hist = Histogram::build(
            HistogramView::Zoomed,
            &[8, 15],
            &p,
            &rule,
            &DisplayOptions::default(),
        );
        assert_eq!(hist.lower, 0);
        assert_eq!(hist.upper, 20);

        let mut classic = p;
        classic.variant = Variant::Classic;
        let hist = Histogram::build(
            HistogramView::Zoomed,
            &[8, 15],
            &classic,
            &rule,
            &DisplayOptions::default(),
        );
        assert_eq!((hist.lower, hist.upper), (7, 16));
    }

    #[test]
    fn test_rejected_bins_follow_rule() {
        let p = params();
        let rule = DecisionRule::from_params(&p);
        let outcomes = [8, 9, 10, 10, 11, 12];
        let hist = Histogram::build(
            HistogramView::Overview,
            &outcomes,
            &p,
            &rule,
            &DisplayOptions::default(),
        );
        assert!(!hist.bins[9].rejected);
        assert!(hist.bins[10].rejected);
        assert_eq!(hist.rejected_count(), 4);
    }

    #[test]
    fn test_cutoffs_only_when_requested() {
        let p = params();
        let rule = DecisionRule::from_params(&p);
        let hidden = Histogram::build(
            HistogramView::Overview,
            &[5],
            &p,
            &rule,
            &DisplayOptions::default(),
        );
        assert!(hidden.cutoffs.is_empty());

        let shown = Histogram::build(
            HistogramView::Overview,
            &[5],
            &p,
            &rule,
            &DisplayOptions {
                show_threshold: true,
                use_proportions: false,
            },
        );
        assert_eq!(shown.cutoffs, vec![10.0]);
    }

    #[test]
    fn test_empty_outcomes() {
        let p = params();
        let rule = DecisionRule::from_params(&p);
        let hists = Histogram::build_both(&[], &p, &rule, &DisplayOptions::default());
        assert_eq!(hists.len(), 2);
        assert_eq!(hists[1].lower, 0);
        assert_eq!(hists[1].y_limit, 0.0);
    }

    #[test]
    fn test_axis_label() {
        assert_eq!(axis_label(150.0, 500, false), "150");
        assert_eq!(axis_label(150.0, 500, true), "30.0%");
    }
}
