//! Simulation settings, input validation and TOML config loading
//!
//! Settings arrive either from a `hyposim.toml` file, from CLI flags, or both.
//! Raw settings are deserialised into [`SimulationConfig`] and validated into
//! [`SimulationParams`], which is what the sampler and calculators consume.
//!
//! # Example hyposim.toml
//!
//! ```toml
//! [simulation]
//! sample_size = 500
//! observed_proportion = 0.32
//! null_hypothesis = 0.3
//! simulation_size = 10000
//! test_type = "twosided"
//! variant = "revised"
//!
//! [display]
//! show_threshold = true
//! use_proportions = false
//! ```

use crate::sampler::MAX_SIMULATIONS;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating simulation settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a proportion between 0 and 1, got {value}")]
    ProportionOutOfRange { name: &'static str, value: f64 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Direction of the hypothesis test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    /// One-sided, rejection region on the right
    #[default]
    Right,
    /// One-sided, rejection region on the left
    Left,
    /// Two-sided, rejection regions in both tails
    #[value(name = "twosided")]
    TwoSided,
}

impl TestType {
    /// Stable lowercase name used in reports and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Right => "right",
            TestType::Left => "left",
            TestType::TwoSided => "twosided",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How outcomes on the threshold itself are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// `≥` / `≤` against rounded thresholds
    Inclusive,
    /// `>` / `<` against unrounded thresholds
    Strict,
}

/// Application variant; selects input limits and the comparison convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// First release: strict comparisons, sample sizes from 1
    Classic,
    /// Current release: inclusive comparisons, sample sizes from 100
    #[default]
    Revised,
}

impl Variant {
    /// Smallest accepted sample size, also used for non-numeric input
    pub fn sample_size_floor(&self) -> u64 {
        match self {
            Variant::Classic => 1,
            Variant::Revised => 100,
        }
    }

    /// Largest accepted sample size
    pub fn sample_size_ceiling(&self) -> u64 {
        match self {
            Variant::Classic => 100_000,
            Variant::Revised => 10_000,
        }
    }

    pub fn convention(&self) -> Convention {
        match self {
            Variant::Classic => Convention::Strict,
            Variant::Revised => Convention::Inclusive,
        }
    }

    /// Padding around the observed range in the zoomed histogram
    pub fn zoom_margin(&self) -> u64 {
        match self {
            Variant::Classic => 1,
            Variant::Revised => 10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Revised => "revised",
        }
    }
}

/// Sample size exactly as the user entered it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SampleSizeInput {
    Number(f64),
    Text(String),
}

impl Default for SampleSizeInput {
    fn default() -> Self {
        SampleSizeInput::Number(500.0)
    }
}

impl From<&str> for SampleSizeInput {
    fn from(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) => SampleSizeInput::Number(value),
            Err(_) => SampleSizeInput::Text(raw.to_string()),
        }
    }
}

impl From<u64> for SampleSizeInput {
    fn from(value: u64) -> Self {
        SampleSizeInput::Number(value as f64)
    }
}

impl SampleSizeInput {
    /// Resolve the input to a usable sample size for `variant`
    ///
    /// Numbers are truncated toward zero, non-numeric input falls back to the
    /// variant floor, and the result always lies within the variant limits.
    pub fn resolve(&self, variant: Variant) -> u64 {
        let floor = variant.sample_size_floor();
        let ceiling = variant.sample_size_ceiling();

        let value = match self {
            SampleSizeInput::Number(value) => *value,
            SampleSizeInput::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    tracing::warn!(
                        input = %text,
                        floor,
                        "sample size is not a number, using floor value"
                    );
                    return floor;
                }
            },
        };

        if !value.is_finite() || value.trunc() < floor as f64 {
            tracing::warn!(requested = value, floor, "sample size raised to floor");
            return floor;
        }
        if value.trunc() > ceiling as f64 {
            tracing::warn!(requested = value, ceiling, "sample size lowered to ceiling");
            return ceiling;
        }
        value.trunc() as u64
    }
}

/// Clamp a requested number of simulations to `1..=MAX_SIMULATIONS`
pub fn clamp_simulation_size(requested: u64) -> usize {
    if requested == 0 {
        tracing::warn!("simulation size 0 raised to 1");
        return 1;
    }
    if requested > MAX_SIMULATIONS as u64 {
        tracing::warn!(
            requested,
            cap = MAX_SIMULATIONS,
            "simulation size clamped to hard cap"
        );
        return MAX_SIMULATIONS;
    }
    requested as usize
}

/// `[simulation]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub sample_size: SampleSizeInput,
    pub observed_proportion: f64,
    pub null_hypothesis: f64,
    pub simulation_size: u64,
    pub test_type: TestType,
    pub variant: Variant,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            sample_size: SampleSizeInput::default(),
            observed_proportion: 0.32,
            null_hypothesis: 0.3,
            simulation_size: 10_000,
            test_type: TestType::default(),
            variant: Variant::default(),
        }
    }
}

/// `[display]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Report cutoff marker positions on the histograms
    pub show_threshold: bool,
    /// Label outcomes as proportions of the sample size instead of counts
    pub use_proportions: bool,
}

/// Root configuration for hyposim.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub simulation: SimulationSettings,
    pub display: DisplayOptions,
}

impl SimulationConfig {
    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Load settings from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate the raw settings into engine parameters
    pub fn validate(&self) -> Result<SimulationParams> {
        let s = &self.simulation;
        check_proportion("observed_proportion", s.observed_proportion)?;
        check_proportion("null_hypothesis", s.null_hypothesis)?;

        Ok(SimulationParams {
            sample_size: s.sample_size.resolve(s.variant),
            observed_proportion: s.observed_proportion,
            null_hypothesis: s.null_hypothesis,
            simulation_size: clamp_simulation_size(s.simulation_size),
            test_type: s.test_type,
            variant: s.variant,
        })
    }
}

fn check_proportion(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProportionOutOfRange { name, value })
    }
}

/// Validated parameters driving one simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParams {
    /// Sample size `n` of each simulated sample
    pub sample_size: u64,
    /// Observed sample proportion `p̂`
    pub observed_proportion: f64,
    /// Proportion under the null hypothesis `p0`
    pub null_hypothesis: f64,
    /// Number of simulated samples `N`
    pub simulation_size: usize,
    pub test_type: TestType,
    pub variant: Variant,
}

impl SimulationParams {
    pub fn convention(&self) -> Convention {
        self.variant.convention()
    }

    /// True when a change from `other` requires drawing a new pool
    pub fn needs_new_pool(&self, other: &SimulationParams) -> bool {
        self.sample_size != other.sample_size || self.null_hypothesis != other.null_hypothesis
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        // Defaults are valid by construction
        SimulationParams {
            sample_size: 500,
            observed_proportion: 0.32,
            null_hypothesis: 0.3,
            simulation_size: 10_000,
            test_type: TestType::Right,
            variant: Variant::Revised,
        }
    }
}
