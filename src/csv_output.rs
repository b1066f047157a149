//! CSV output format for spreadsheet analysis
//!
//! Either the per-simulation data table or the histogram bins.

use crate::histogram::Histogram;
use crate::table::SimulationRow;

/// CSV formatter for the simulation data table
#[derive(Debug, Default)]
pub struct CsvTableOutput {
    rows: Vec<SimulationRow>,
}

impl CsvTableOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, row: SimulationRow) {
        self.rows.push(row);
    }

    fn header() -> &'static str {
        "simulation,successes,proportion,rejected"
    }

    fn format_row(row: &SimulationRow) -> String {
        format!(
            "{},{},{},{}",
            row.index, row.successes, row.proportion, row.rejected
        )
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(Self::header());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }
}

/// CSV formatter for histogram bins of one or more views
#[derive(Debug, Default)]
pub struct CsvHistogramOutput {
    lines: Vec<String>,
}

impl CsvHistogramOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_histogram(&mut self, hist: &Histogram) {
        let view = hist.view.as_str();
        for bin in &hist.bins {
            self.lines
                .push(format!("{},{},{},{}", view, bin.value, bin.count, bin.rejected));
        }
    }

    pub fn to_csv(&self) -> String {
        let mut output = String::from("view,value,count,rejected\n");
        for line in &self.lines {
            output.push_str(line);
            output.push('\n');
        }
        output
    }
}
