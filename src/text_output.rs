//! Human-readable report (default output format)

use crate::histogram::{axis_label, Histogram, HistogramView};
use crate::report::SimulationReport;

/// Width of the longest histogram bar
const BAR_WIDTH: usize = 50;

/// Maximum number of histogram rows; wider ranges are grouped
const MAX_HISTOGRAM_ROWS: usize = 40;

/// Text formatter for a [`SimulationReport`]
#[derive(Debug, Clone, Copy)]
pub struct TextOutput {
    /// Draw the zoomed histogram
    pub histogram: bool,
    /// Rows of the data table to print (0 hides the table)
    pub table_rows: usize,
}

impl TextOutput {
    pub fn new(histogram: bool, table_rows: usize) -> Self {
        Self {
            histogram,
            table_rows,
        }
    }

    pub fn render(&self, report: &SimulationReport) -> String {
        let mut out = String::new();
        let p = &report.params;

        out.push_str("=== Simulation settings ===\n");
        out.push_str(&format!("Sample size n:            {}\n", p.sample_size));
        out.push_str(&format!(
            "Observed proportion p̂:    {}\n",
            p.observed_proportion
        ));
        out.push_str(&format!("Null hypothesis p0:       {}\n", p.null_hypothesis));
        let selected = report.p_value.total;
        if selected == p.simulation_size {
            out.push_str(&format!("Simulations:              {}\n", selected));
        } else {
            out.push_str(&format!(
                "Simulations:              {} (requested {})\n",
                selected, p.simulation_size
            ));
        }
        out.push_str(&format!("Test type:                {}\n", p.test_type));
        out.push_str(&format!("Variant:                  {}\n", p.variant.as_str()));
        out.push('\n');

        out.push_str("=== Simulation results ===\n");
        out.push_str(&format!("Threshold(s):             {}\n", report.rule_text));
        out.push_str(&format!("Empirical p-value:        {}\n", report.p_value));

        if let Some(dist) = &report.distribution {
            out.push_str(&format!(
                "Simulated X:              mean {:.2}, sd {:.2}, min {}, max {}\n",
                dist.mean, dist.stddev, dist.min, dist.max
            ));
            out.push_str(&format!(
                "                          P5 {}, median {}, P95 {}\n",
                dist.p5, dist.median, dist.p95
            ));
        }
        out.push_str(&format!(
            "Null model:               mean {:.2}, sd {:.2}\n",
            report.null_model.mean, report.null_model.stddev
        ));

        if let Some(points) = &report.sweep {
            out.push_str("\n=== Convergence ===\n");
            out.push_str(&format!("{:>12}  p-value\n", "simulations"));
            for point in points {
                out.push_str(&format!(
                    "{:>12}  {}\n",
                    point.simulation_size, point.p_value
                ));
            }
        }

        if self.histogram {
            if let Some(hist) = report.histogram(HistogramView::Zoomed) {
                out.push('\n');
                out.push_str(&render_histogram(
                    hist,
                    p.sample_size,
                    report.display.use_proportions,
                ));
            }
        }

        if self.table_rows > 0 {
            if let Some(rows) = &report.rows {
                out.push_str("\n=== Simulation data ===\n");
                out.push_str(&format!(
                    "{:>10} {:>10} {:>10}  rejected\n",
                    "simulation", "successes", "proportion"
                ));
                for row in rows.iter().take(self.table_rows) {
                    out.push_str(&format!(
                        "{:>10} {:>10} {:>10.4}  {}\n",
                        row.index,
                        row.successes,
                        row.proportion,
                        if row.rejected { "yes" } else { "no" }
                    ));
                }
                if rows.len() > self.table_rows {
                    out.push_str(&format!(
                        "... {} more rows\n",
                        rows.len() - self.table_rows
                    ));
                }
            }
        }

        out
    }
}

/// Draw `hist` as horizontal bars
///
/// Bins are grouped so at most [`MAX_HISTOGRAM_ROWS`] rows are printed. The
/// rejected share of each row is drawn with `#`, the rest with `=`.
pub fn render_histogram(hist: &Histogram, sample_size: u64, use_proportions: bool) -> String {
    let mut out = format!("=== Histogram ({}) ===\n", hist.view.title());

    if hist.bins.is_empty() {
        return out;
    }

    let group = hist.bins.len().div_ceil(MAX_HISTOGRAM_ROWS).max(1);
    let rows: Vec<(u64, u64, u64, u64)> = hist
        .bins
        .chunks(group)
        .map(|chunk| {
            let first = chunk[0].value;
            let last = chunk[chunk.len() - 1].value;
            let rejected: u64 = chunk.iter().filter(|b| b.rejected).map(|b| b.count).sum();
            let accepted: u64 = chunk.iter().filter(|b| !b.rejected).map(|b| b.count).sum();
            (first, last, rejected, accepted)
        })
        .collect();

    let tallest = rows.iter().map(|r| r.2 + r.3).max().unwrap_or(0).max(1);

    for (first, last, rejected, accepted) in rows {
        let total = rejected + accepted;
        let width = (total as f64 / tallest as f64 * BAR_WIDTH as f64).round() as usize;
        let hashes = if total > 0 {
            (rejected as f64 / total as f64 * width as f64).round() as usize
        } else {
            0
        };
        let label = if first == last {
            axis_label(first as f64, sample_size, use_proportions)
        } else {
            format!(
                "{}-{}",
                axis_label(first as f64, sample_size, use_proportions),
                axis_label(last as f64, sample_size, use_proportions)
            )
        };
        out.push_str(&format!(
            "{:>15} | {}{} {}\n",
            label,
            "#".repeat(hashes),
            "=".repeat(width - hashes),
            total
        ));
    }

    if !hist.cutoffs.is_empty() {
        let marks: Vec<String> = hist
            .cutoffs
            .iter()
            .map(|&c| axis_label(c, sample_size, use_proportions))
            .collect();
        out.push_str(&format!("Cutoff(s): {}\n", marks.join(", ")));
    }

    out
}
