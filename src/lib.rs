//! hyposim - Hypothesis testing via simulation
//!
//! This library draws seeded binomial samples under a null hypothesis,
//! derives the decision threshold for right, left and two-sided tests, and
//! computes the empirical p-value, histogram data and per-simulation table
//! for the selected outcomes.

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod histogram;
pub mod html_output;
pub mod json_output;
pub mod report;
pub mod sampler;
pub mod session;
pub mod stats;
pub mod sweep;
pub mod table;
pub mod text_output;
pub mod threshold;
