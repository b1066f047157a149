//! CLI argument parsing for hyposim

use crate::config::{SampleSizeInput, SimulationConfig, TestType, Variant};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for simulation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
    /// Self-contained HTML report
    Html,
}

/// What `--format csv` writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CsvContent {
    /// One row per simulated sample
    Table,
    /// One row per histogram bin
    Histogram,
}

#[derive(Parser, Debug)]
#[command(name = "hyposim")]
#[command(version)]
#[command(about = "Hypothesis testing via simulation of binomial samples", long_about = None)]
pub struct Cli {
    /// Sample size n; non-numeric input falls back to the variant floor
    #[arg(short = 'n', long = "sample-size", value_name = "N")]
    pub sample_size: Option<String>,

    /// Observed sample proportion p̂
    #[arg(long = "observed", value_name = "P")]
    pub observed: Option<f64>,

    /// Proportion under the null hypothesis p0
    #[arg(long = "null", value_name = "P")]
    pub null: Option<f64>,

    /// Number of simulated samples (capped at 1,000,000)
    #[arg(short = 's', long = "simulations", value_name = "COUNT")]
    pub simulations: Option<u64>,

    /// Test direction
    #[arg(short = 't', long = "test", value_enum)]
    pub test: Option<TestType>,

    /// Application variant (input limits and comparison convention)
    #[arg(long = "variant", value_enum)]
    pub variant: Option<Variant>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Report the threshold cutoff positions on the histograms
    #[arg(long = "show-threshold")]
    pub show_threshold: bool,

    /// Label outcomes as proportions of n instead of counts
    #[arg(long = "use-proportions")]
    pub use_proportions: bool,

    /// Include histograms in the report
    #[arg(long = "histogram")]
    pub histogram: bool,

    /// Include the per-simulation data table in the report
    #[arg(long = "table")]
    pub table: bool,

    /// Rows of the data table printed in text mode
    #[arg(long = "table-rows", value_name = "ROWS", default_value = "10")]
    pub table_rows: usize,

    /// What --format csv writes
    #[arg(long = "csv-content", value_enum, default_value = "table")]
    pub csv_content: CsvContent,

    /// Recompute the p-value for each simulation count, reusing one pool
    #[arg(long = "sweep", value_name = "COUNTS", value_delimiter = ',')]
    pub sweep: Vec<u64>,

    /// Load settings from a TOML file (flags override it)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Overlay the flags given on the command line onto `config`
    pub fn apply_to(&self, config: &mut SimulationConfig) {
        let sim = &mut config.simulation;
        if let Some(raw) = &self.sample_size {
            sim.sample_size = SampleSizeInput::from(raw.as_str());
        }
        if let Some(observed) = self.observed {
            sim.observed_proportion = observed;
        }
        if let Some(null) = self.null {
            sim.null_hypothesis = null;
        }
        if let Some(simulations) = self.simulations {
            sim.simulation_size = simulations;
        }
        if let Some(test) = self.test {
            sim.test_type = test;
        }
        if let Some(variant) = self.variant {
            sim.variant = variant;
        }
        config.display.show_threshold |= self.show_threshold;
        config.display.use_proportions |= self.use_proportions;
    }

    /// Whether the report needs the data table
    pub fn wants_table(&self) -> bool {
        self.table || (self.format == OutputFormat::Csv && self.csv_content == CsvContent::Table)
    }
}
