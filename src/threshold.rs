//! Decision thresholds and empirical p-values
//!
//! A [`DecisionRule`] combines the test direction, the comparison convention
//! and the threshold(s) derived from `n`, `p0` and `p̂`. The same rule drives
//! p-value counting, histogram highlighting and the data table, so all three
//! always agree on which outcomes are "at least as extreme".

use crate::config::{Convention, SimulationParams, TestType};
use serde::Serialize;
use std::fmt;

/// Round half to even at `decimals` decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    // `+ 0.0` folds -0.0 into 0.0
    (value * scale).round_ties_even() / scale + 0.0
}

/// Threshold value(s) of a decision rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Threshold {
    OneSided { value: f64 },
    TwoSided { left: f64, right: f64 },
}

/// Rejection region for one test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecisionRule {
    pub test_type: TestType,
    pub convention: Convention,
    pub threshold: Threshold,
}

impl DecisionRule {
    /// Derive the rule for `params`
    ///
    /// One-sided tests use `n × p̂`; two-sided tests mirror the distance
    /// `|p0 − p̂|` around `p0`. Under the inclusive convention the one-sided
    /// threshold is rounded to two decimals and the two-sided thresholds to
    /// whole numbers.
    pub fn from_params(params: &SimulationParams) -> Self {
        let n = params.sample_size as f64;
        let convention = params.convention();

        let threshold = match params.test_type {
            TestType::Right | TestType::Left => {
                let raw = n * params.observed_proportion;
                let value = match convention {
                    Convention::Inclusive => round_to(raw, 2),
                    Convention::Strict => raw,
                };
                Threshold::OneSided { value }
            }
            TestType::TwoSided => {
                let distance = (params.null_hypothesis - params.observed_proportion).abs();
                let left = n * (params.null_hypothesis - distance);
                let right = n * (params.null_hypothesis + distance);
                match convention {
                    Convention::Inclusive => Threshold::TwoSided {
                        left: round_to(left, 0),
                        right: round_to(right, 0),
                    },
                    Convention::Strict => Threshold::TwoSided { left, right },
                }
            }
        };

        Self {
            test_type: params.test_type,
            convention,
            threshold,
        }
    }

    /// Is outcome `x` in the rejection region?
    pub fn rejects(&self, x: f64) -> bool {
        match (self.threshold, self.test_type) {
            (Threshold::OneSided { value }, TestType::Left) => self.at_or_below(x, value),
            (Threshold::OneSided { value }, _) => self.at_or_above(x, value),
            (Threshold::TwoSided { left, right }, _) => {
                self.at_or_below(x, left) || self.at_or_above(x, right)
            }
        }
    }

    fn at_or_above(&self, x: f64, bound: f64) -> bool {
        match self.convention {
            Convention::Inclusive => x >= bound,
            Convention::Strict => x > bound,
        }
    }

    fn at_or_below(&self, x: f64, bound: f64) -> bool {
        match self.convention {
            Convention::Inclusive => x <= bound,
            Convention::Strict => x < bound,
        }
    }

    /// Human-readable rejection rule, e.g. `X ≤ 140 or X ≥ 160`
    pub fn describe(&self) -> String {
        let (above, below) = match self.convention {
            Convention::Inclusive => ("≥", "≤"),
            Convention::Strict => (">", "<"),
        };

        match (self.threshold, self.test_type) {
            (Threshold::OneSided { value }, TestType::Left) => {
                format!("X {} {}", below, round_to(value, 2))
            }
            (Threshold::OneSided { value }, _) => format!("X {} {}", above, round_to(value, 2)),
            (Threshold::TwoSided { left, right }, _) => format!(
                "X {} {} or X {} {}",
                below,
                round_to(left, 2),
                above,
                round_to(right, 2)
            ),
        }
    }

    /// Positions of the cutoff markers drawn on the histograms
    pub fn cutoff_lines(&self) -> Vec<f64> {
        match self.threshold {
            Threshold::OneSided { value } => vec![value],
            Threshold::TwoSided { left, right } => vec![left, right],
        }
    }
}

/// Fraction of simulated outcomes at least as extreme as the observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmpiricalPValue {
    /// Outcomes in the rejection region
    pub count: usize,
    /// Outcomes considered
    pub total: usize,
    /// `count / total`, 0 when there are no outcomes
    pub value: f64,
}

impl EmpiricalPValue {
    /// Count the outcomes of `outcomes` rejected by `rule`
    ///
    /// For two-sided tests both tails are counted separately and summed, so an
    /// outcome sitting on both thresholds (when `p̂ == p0`) counts twice.
    pub fn from_outcomes(outcomes: &[u64], rule: &DecisionRule) -> Self {
        let count = match rule.threshold {
            Threshold::OneSided { .. } => outcomes
                .iter()
                .filter(|&&x| rule.rejects(x as f64))
                .count(),
            Threshold::TwoSided { left, right } => {
                let lower = outcomes
                    .iter()
                    .filter(|&&x| rule.at_or_below(x as f64, left))
                    .count();
                let upper = outcomes
                    .iter()
                    .filter(|&&x| rule.at_or_above(x as f64, right))
                    .count();
                lower + upper
            }
        };

        let total = outcomes.len();
        let value = if total > 0 {
            count as f64 / total as f64
        } else {
            0.0
        };

        Self {
            count,
            total,
            value,
        }
    }

    /// Value rounded half-to-even at four decimals
    pub fn rounded(&self) -> f64 {
        round_to(self.value, 4)
    }
}

impl fmt::Display for EmpiricalPValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}={}", self.count, self.total, self.rounded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;

    fn params(test_type: TestType, variant: Variant) -> SimulationParams {
        SimulationParams {
            sample_size: 500,
            observed_proportion: 0.32,
            null_hypothesis: 0.3,
            simulation_size: 10,
            test_type,
            variant,
        }
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-0.4, 0).to_string(), "0");
        assert_eq!(round_to(0.12344, 4), 0.1234);
    }

    #[test]
    fn test_right_threshold() {
        let rule = DecisionRule::from_params(&params(TestType::Right, Variant::Revised));
        assert_eq!(rule.threshold, Threshold::OneSided { value: 160.0 });
        assert!(rule.rejects(160.0));
        assert!(!rule.rejects(159.0));
        assert_eq!(rule.describe(), "X ≥ 160");
    }

    #[test]
    fn test_left_threshold() {
        let rule = DecisionRule::from_params(&params(TestType::Left, Variant::Revised));
        assert!(rule.rejects(160.0));
        assert!(rule.rejects(12.0));
        assert!(!rule.rejects(161.0));
        assert_eq!(rule.describe(), "X ≤ 160");
    }

    #[test]
    fn test_one_sided_threshold_keeps_two_decimals() {
        let mut p = params(TestType::Right, Variant::Revised);
        p.sample_size = 333;
        p.observed_proportion = 0.5;
        let rule = DecisionRule::from_params(&p);
        assert_eq!(rule.threshold, Threshold::OneSided { value: 166.5 });
        assert_eq!(rule.describe(), "X ≥ 166.5");
        assert!(rule.rejects(167.0));
        assert!(!rule.rejects(166.0));
    }

    #[test]
    fn test_two_sided_thresholds() {
        let rule = DecisionRule::from_params(&params(TestType::TwoSided, Variant::Revised));
        assert_eq!(
            rule.threshold,
            Threshold::TwoSided {
                left: 140.0,
                right: 160.0
            }
        );
        assert!(rule.rejects(140.0));
        assert!(rule.rejects(160.0));
        assert!(!rule.rejects(150.0));
        assert_eq!(rule.describe(), "X ≤ 140 or X ≥ 160");
        assert_eq!(rule.cutoff_lines(), vec![140.0, 160.0]);
    }

    #[test]
    fn test_strict_convention_excludes_boundary() {
        let rule = DecisionRule::from_params(&params(TestType::Right, Variant::Classic));
        assert!(!rule.rejects(160.0));
        assert!(rule.rejects(161.0));
        assert_eq!(rule.describe(), "X > 160");

        let two = DecisionRule::from_params(&params(TestType::TwoSided, Variant::Classic));
        assert!(two.rejects(139.0));
        assert!(!two.rejects(145.0));
        assert!(two.describe().starts_with("X < "));
    }

    #[test]
    fn test_p_value_right() {
        let rule = DecisionRule::from_params(&params(TestType::Right, Variant::Revised));
        let outcomes = [150, 155, 160, 161, 170, 140, 159, 162];
        let p = EmpiricalPValue::from_outcomes(&outcomes, &rule);
        assert_eq!(p.count, 4);
        assert_eq!(p.total, 8);
        assert_eq!(p.value, 0.5);
        assert_eq!(p.to_string(), "4/8=0.5");
    }

    #[test]
    fn test_p_value_left() {
        let rule = DecisionRule::from_params(&params(TestType::Left, Variant::Revised));
        let outcomes = [150, 160, 161, 170];
        let p = EmpiricalPValue::from_outcomes(&outcomes, &rule);
        assert_eq!(p.count, 2);
    }

    #[test]
    fn test_p_value_two_sided() {
        let rule = DecisionRule::from_params(&params(TestType::TwoSided, Variant::Revised));
        let outcomes = [130, 140, 141, 150, 159, 160, 175];
        let p = EmpiricalPValue::from_outcomes(&outcomes, &rule);
        assert_eq!(p.count, 4);
        assert_eq!(p.total, 7);
        assert_eq!(p.rounded(), 0.5714);
    }

    #[test]
    fn test_p_value_two_sided_double_counts_on_null() {
        let mut p = params(TestType::TwoSided, Variant::Revised);
        p.observed_proportion = p.null_hypothesis;
        let rule = DecisionRule::from_params(&p);
        let pv = EmpiricalPValue::from_outcomes(&[150, 150, 149], &rule);
        assert_eq!(pv.count, 5);
    }

    #[test]
    fn test_p_value_empty_outcomes() {
        let rule = DecisionRule::from_params(&params(TestType::Right, Variant::Revised));
        let p = EmpiricalPValue::from_outcomes(&[], &rule);
        assert_eq!(p.value, 0.0);
        assert_eq!(p.to_string(), "0/0=0");
    }

    #[test]
    fn test_negative_left_threshold_rejects_nothing_below() {
        let mut p = params(TestType::TwoSided, Variant::Revised);
        p.null_hypothesis = 0.3;
        p.observed_proportion = 0.9;
        let rule = DecisionRule::from_params(&p);
        assert_eq!(
            rule.threshold,
            Threshold::TwoSided {
                left: -150.0,
                right: 450.0
            }
        );
        assert!(!rule.rejects(0.0));
    }
}
