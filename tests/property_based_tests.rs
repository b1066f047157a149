//! Property-based tests for the statistical core
//!
//! Invariants covered:
//! 1. Sample size resolution always lands inside the variant limits
//! 2. Thresholds and p-values follow the documented formulas
//! 3. Growing the simulation count never changes earlier outcomes
//! 4. Histogram, table and p-value agree on the rejection region

use hyposim::config::{DisplayOptions, SampleSizeInput, SimulationParams, TestType, Variant};
use hyposim::histogram::{Histogram, HistogramView};
use hyposim::session::SimulationSession;
use hyposim::table::build_table;
use hyposim::threshold::{round_to, DecisionRule, EmpiricalPValue, Threshold};
use proptest::prelude::*;

fn test_type() -> impl Strategy<Value = TestType> {
    prop_oneof![
        Just(TestType::Right),
        Just(TestType::Left),
        Just(TestType::TwoSided)
    ]
}

fn variant() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::Classic), Just(Variant::Revised)]
}

prop_compose! {
    fn params()(
        sample_size in 1u64..2_000,
        observed in 0.0f64..=1.0,
        null in 0.0f64..=1.0,
        simulation_size in 1usize..400,
        test_type in test_type(),
        variant in variant(),
    ) -> SimulationParams {
        SimulationParams {
            sample_size,
            observed_proportion: observed,
            null_hypothesis: null,
            simulation_size,
            test_type,
            variant,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_sample_size_within_limits(raw in any::<f64>(), variant in variant()) {
        let n = SampleSizeInput::Number(raw).resolve(variant);
        prop_assert!(n >= variant.sample_size_floor());
        prop_assert!(n <= variant.sample_size_ceiling());
    }

    #[test]
    fn prop_text_sample_size_never_panics(raw in ".*", variant in variant()) {
        let n = SampleSizeInput::from(raw.as_str()).resolve(variant);
        prop_assert!(n >= variant.sample_size_floor());
    }

    #[test]
    fn prop_inclusive_thresholds_match_formula(p in params()) {
        let p = SimulationParams { variant: Variant::Revised, ..p };
        let n = p.sample_size as f64;
        let rule = DecisionRule::from_params(&p);
        match rule.threshold {
            Threshold::OneSided { value } => {
                prop_assert_eq!(value, round_to(n * p.observed_proportion, 2));
            }
            Threshold::TwoSided { left, right } => {
                let d = (p.null_hypothesis - p.observed_proportion).abs();
                prop_assert_eq!(left, round_to(n * (p.null_hypothesis - d), 0));
                prop_assert_eq!(right, round_to(n * (p.null_hypothesis + d), 0));
                prop_assert!(left <= right);
            }
        }
    }

    #[test]
    fn prop_p_value_counts_rejected_outcomes(
        p in params(),
        outcomes in prop::collection::vec(0u64..2_000, 0..300),
    ) {
        let rule = DecisionRule::from_params(&p);
        let pv = EmpiricalPValue::from_outcomes(&outcomes, &rule);
        prop_assert_eq!(pv.total, outcomes.len());

        let expected = match rule.threshold {
            Threshold::OneSided { .. } => outcomes.iter().filter(|&&x| rule.rejects(x as f64)).count(),
            Threshold::TwoSided { left, right } => {
                let (below, above) = match p.variant {
                    Variant::Revised => (
                        outcomes.iter().filter(|&&x| (x as f64) <= left).count(),
                        outcomes.iter().filter(|&&x| (x as f64) >= right).count(),
                    ),
                    Variant::Classic => (
                        outcomes.iter().filter(|&&x| (x as f64) < left).count(),
                        outcomes.iter().filter(|&&x| (x as f64) > right).count(),
                    ),
                };
                below + above
            }
        };
        prop_assert_eq!(pv.count, expected);
    }

    #[test]
    fn prop_right_and_left_partition_for_strict_and_inclusive(p in params(), x in 0u64..2_000) {
        let right = DecisionRule::from_params(&SimulationParams { test_type: TestType::Right, ..p });
        let left = DecisionRule::from_params(&SimulationParams { test_type: TestType::Left, ..p });
        // Every outcome is extreme in at least one direction under the inclusive rule
        if p.variant == Variant::Revised {
            prop_assert!(right.rejects(x as f64) || left.rejects(x as f64));
        } else {
            prop_assert!(!(right.rejects(x as f64) && left.rejects(x as f64)));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn prop_growing_selection_keeps_prefix(p in params(), extra in 1usize..200) {
        let p = SimulationParams { sample_size: p.sample_size.min(500), ..p };
        let capacity = p.simulation_size + extra;
        let mut session = SimulationSession::with_capacity(p, capacity).unwrap();
        let before = session.selected().to_vec();

        session.update(SimulationParams { simulation_size: capacity, ..p }).unwrap();
        prop_assert_eq!(&session.selected()[..before.len()], before.as_slice());
        prop_assert!(session.selected().iter().all(|&x| x <= p.sample_size));
    }

    #[test]
    fn prop_views_agree_on_rejections(p in params()) {
        let p = SimulationParams { sample_size: p.sample_size.min(500), ..p };
        let session = SimulationSession::with_capacity(p, p.simulation_size).unwrap();
        let rule = session.decision_rule();
        let outcomes = session.selected();

        let overview = Histogram::build(
            HistogramView::Overview,
            outcomes,
            &p,
            &rule,
            &DisplayOptions::default(),
        );
        let rows = build_table(outcomes, &p, &rule);
        let rejected_rows = rows.iter().filter(|r| r.rejected).count() as u64;

        prop_assert_eq!(overview.rejected_count(), rejected_rows);
        prop_assert_eq!(overview.bins.iter().map(|b| b.count).sum::<u64>(), outcomes.len() as u64);
        if matches!(rule.threshold, Threshold::OneSided { .. }) {
            prop_assert_eq!(session.p_value().count as u64, rejected_rows);
        }
    }
}
