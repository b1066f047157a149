//! HTML output format for simulation reports
//!
//! Self-contained page with embedded CSS: settings, results, histogram bin
//! tables with rejected bins highlighted, and the optional data table.

use crate::histogram::{axis_label, Histogram};
use crate::report::SimulationReport;

/// HTML output formatter
#[derive(Debug)]
pub struct HtmlOutput {
    include_histograms: bool,
}

impl HtmlOutput {
    /// Create a new HTML output formatter
    pub fn new(include_histograms: bool) -> Self {
        Self { include_histograms }
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        .value {
            font-family: monospace;
        }
        .rejected td {
            background-color: #ffd699;
        }
        .bar {
            display: inline-block;
            height: 10px;
            background-color: #4a90d9;
        }
        .rejected .bar {
            background-color: #ff9900;
        }
        .cutoff {
            color: #cc0000;
            font-weight: bold;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    fn row_class(rejected: bool) -> &'static str {
        if rejected {
            " class=\"rejected\""
        } else {
            ""
        }
    }

    /// Render the settings and results tables
    fn render_summary(report: &SimulationReport) -> String {
        let p = &report.params;
        let mut html = String::new();

        html.push_str("    <h2>Simulation settings</h2>\n");
        html.push_str("    <table>\n");
        let selected = report.p_value.total;
        let simulations = if selected == p.simulation_size {
            selected.to_string()
        } else {
            format!("{} (requested {})", selected, p.simulation_size)
        };
        let settings = [
            ("Sample size n", p.sample_size.to_string()),
            ("Observed proportion p&#770;", p.observed_proportion.to_string()),
            ("Null hypothesis p<sub>0</sub>", p.null_hypothesis.to_string()),
            ("Simulations", simulations),
            ("Test type", p.test_type.to_string()),
            ("Variant", p.variant.as_str().to_string()),
        ];
        for (name, value) in settings {
            html.push_str(&format!(
                "        <tr><th>{}</th><td class=\"value\">{}</td></tr>\n",
                name,
                Self::escape_html(&value)
            ));
        }
        html.push_str("    </table>\n");

        html.push_str("    <h2>Simulation results</h2>\n");
        html.push_str("    <table>\n");
        html.push_str(&format!(
            "        <tr><th>Threshold(s)</th><td class=\"value\">{}</td></tr>\n",
            Self::escape_html(&report.rule_text)
        ));
        html.push_str(&format!(
            "        <tr><th>Empirical p-value</th><td class=\"value\">{}</td></tr>\n",
            Self::escape_html(&report.p_value.to_string())
        ));
        if let Some(dist) = &report.distribution {
            html.push_str(&format!(
                "        <tr><th>Simulated X</th><td class=\"value\">mean {:.2}, sd {:.2}, min {}, max {}</td></tr>\n",
                dist.mean, dist.stddev, dist.min, dist.max
            ));
        }
        html.push_str(&format!(
            "        <tr><th>Null model</th><td class=\"value\">mean {:.2}, sd {:.2}</td></tr>\n",
            report.null_model.mean, report.null_model.stddev
        ));
        html.push_str("    </table>\n");

        html
    }

    /// Render one histogram as a table of bins with inline bars
    fn render_histogram(hist: &Histogram, sample_size: u64, use_proportions: bool) -> String {
        let mut html = String::new();
        let tallest = hist.max_count().max(1);

        html.push_str(&format!("    <h2>Histogram: {}</h2>\n", hist.view.title()));
        if !hist.cutoffs.is_empty() {
            let marks: Vec<String> = hist
                .cutoffs
                .iter()
                .map(|&c| axis_label(c, sample_size, use_proportions))
                .collect();
            html.push_str(&format!(
                "    <p class=\"cutoff\">Cutoff(s): {}</p>\n",
                Self::escape_html(&marks.join(", "))
            ));
        }
        html.push_str("    <table>\n");
        html.push_str("        <tr><th>X</th><th>Frequency</th><th></th></tr>\n");

        for bin in hist.bins.iter().filter(|b| b.count > 0) {
            let width = bin.count as f64 / tallest as f64 * 300.0;
            html.push_str(&format!(
                "        <tr{}><td class=\"value\">{}</td><td class=\"value\">{}</td><td><span class=\"bar\" style=\"width: {:.0}px\"></span></td></tr>\n",
                Self::row_class(bin.rejected),
                Self::escape_html(&axis_label(bin.value as f64, sample_size, use_proportions)),
                bin.count,
                width
            ));
        }

        html.push_str("    </table>\n");
        html
    }

    /// Generate complete HTML document
    pub fn to_html(&self, report: &SimulationReport) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("    <title>Hypothesis Test Simulation Report</title>\n");
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        html.push_str("<body>\n");
        html.push_str("    <h1>Hypothesis testing with simulations</h1>\n");
        html.push_str(&Self::render_summary(report));

        if self.include_histograms {
            for hist in &report.histograms {
                html.push_str(&Self::render_histogram(
                    hist,
                    report.params.sample_size,
                    report.display.use_proportions,
                ));
            }
        }

        if let Some(rows) = &report.rows {
            html.push_str("    <h2>Simulation data</h2>\n");
            html.push_str("    <table>\n");
            html.push_str("        <tr><th>Simulation</th><th>Successes</th><th>Proportion</th><th>Rejected</th></tr>\n");
            for row in rows {
                html.push_str(&format!(
                    "        <tr{}><td>{}</td><td>{}</td><td>{:.4}</td><td>{}</td></tr>\n",
                    Self::row_class(row.rejected),
                    row.index,
                    row.successes,
                    row.proportion,
                    if row.rejected { "yes" } else { "no" }
                ));
            }
            html.push_str("    </table>\n");
        }

        html.push_str("    <div class=\"footer\">\n");
        html.push_str("        Generated by hyposim - Hypothesis Testing via Simulation\n");
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }
}
