//! # Engine Property Tests
//!
//! Properties every constrained draw must hold regardless of seed or call
//! pattern: determinism, range, filter satisfaction and one trace slot per
//! decision. Call patterns are generated from a separate ChaCha stream so a
//! failure can be reproduced from the scenario seed in the assertion message.

use choice_engine::{
    Decisions, Disallow, Engine, Filter, GeneratorSelector, Nested, RawStream, StrategyTag,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One call against the engine
#[derive(Debug, Clone)]
enum Call {
    Choose { bound: u32, reject_below: Option<u32> },
    Flip { percent: u32, filtered: bool },
    Hex(usize),
}

fn random_calls(scenario: u64, count: usize) -> Vec<Call> {
    let mut rng = ChaCha8Rng::seed_from_u64(scenario);
    (0..count)
        .map(|_| match rng.gen_range(0..3) {
            0 => {
                let bound = rng.gen_range(1..50);
                let reject_below = if bound > 1 && rng.gen_bool(0.5) {
                    Some(rng.gen_range(0..bound))
                } else {
                    None
                };
                Call::Choose { bound, reject_below }
            }
            1 => Call::Flip {
                percent: rng.gen_range(0..=100),
                filtered: rng.gen_bool(0.2),
            },
            _ => Call::Hex(rng.gen_range(0..4)),
        })
        .collect()
}

/// Replay `calls` against `engine`, checking per-call properties on the way
fn drive(engine: &mut Engine, calls: &[Call], scenario: u64) -> Vec<u32> {
    let mut outputs = Vec::new();
    for call in calls {
        let depth_before = engine.rand_depth();
        match call {
            Call::Choose { bound, reject_below } => {
                let threshold = reject_below.unwrap_or(0);
                let filter = move |v: u32| v < threshold;
                let filter_ref: Option<&dyn Filter> = reject_below.map(|_| &filter as &dyn Filter);
                let v = engine.choose_uniform(*bound, filter_ref, Some("choose"));
                assert!(v < *bound, "scenario {}: {} not below {}", scenario, v, bound);
                assert!(v >= threshold, "scenario {}: filter violated by {}", scenario, v);
                assert_eq!(engine.rand_depth(), depth_before + 1, "scenario {}", scenario);
                outputs.push(v);
            }
            Call::Flip { percent, filtered } => {
                let only_true = Disallow(vec![1]);
                let filter: Option<&dyn Filter> = if *filtered { Some(&only_true) } else { None };
                let b = engine.weighted_boolean(*percent, filter);
                if *filtered {
                    assert!(b, "scenario {}: filter allowing 0 must force true", scenario);
                }
                assert_eq!(engine.rand_depth(), depth_before + 1, "scenario {}", scenario);
                outputs.push(u32::from(b));
            }
            Call::Hex(count) => {
                let digits = engine.random_hex_digits(*count);
                assert_eq!(digits.len(), *count);
                outputs.extend(digits.chars().filter_map(|c| c.to_digit(16)));
            }
        }
    }
    outputs
}

fn fresh_engine_run(strategy: StrategyTag, seed: u64, calls: &[Call], scenario: u64) -> (Vec<u32>, String) {
    let mut selector = GeneratorSelector::new();
    let engine = selector.make_engine(strategy, seed);
    let outputs = drive(engine, calls, scenario);
    let serialized = engine.serialize_current_sequence();
    selector.teardown();
    (outputs, serialized)
}

#[test]
fn test_identical_runs_are_identical() {
    for scenario in 0..40u64 {
        let calls = random_calls(scenario, 60);
        for strategy in [StrategyTag::Default, StrategyTag::Dfs] {
            let first = fresh_engine_run(strategy, scenario * 31 + 1, &calls, scenario);
            let second = fresh_engine_run(strategy, scenario * 31 + 1, &calls, scenario);
            assert_eq!(first, second, "scenario {} with {} diverged", scenario, strategy);
        }
    }
}

#[test]
fn test_different_seeds_usually_differ() {
    let calls: Vec<Call> = (0..32)
        .map(|_| Call::Choose { bound: 1000, reject_below: None })
        .collect();
    let (a, _) = fresh_engine_run(StrategyTag::Default, 1, &calls, 0);
    let (b, _) = fresh_engine_run(StrategyTag::Default, 2, &calls, 0);
    assert_ne!(a, b);
}

#[test]
fn test_serialized_sequence_matches_unfiltered_choices() {
    let calls: Vec<Call> = (1..=20)
        .map(|bound| Call::Choose { bound, reject_below: None })
        .collect();
    let (outputs, serialized) = fresh_engine_run(StrategyTag::Default, 1234, &calls, 0);

    let expected: Vec<String> = outputs.iter().map(|v| v.to_string()).collect();
    assert_eq!(serialized, expected.join("_"));
}

#[test]
fn test_seed_42_scenario() {
    let run = || {
        let mut selector = GeneratorSelector::new();
        let engine = selector.make_engine(StrategyTag::Default, 42);
        let values: Vec<u32> = (0..5).map(|_| engine.choose_uniform(6, None, None)).collect();
        let serialized = engine.serialize_current_sequence();
        selector.teardown();
        (values, serialized)
    };

    let (values, serialized) = run();
    assert_eq!(values, vec![1, 5, 1, 0, 5]);
    assert_eq!(serialized, "1_5_1_0_5");
    assert_eq!(run(), (values, serialized));
}

#[test]
fn test_rejected_candidates_never_reach_the_sequence() {
    let mut selector = GeneratorSelector::new();
    let engine = selector.make_engine(StrategyTag::Default, 99);

    // Everything but 3 is rejected, so every draw retries several times.
    let only_three = |v: u32| v != 3;
    for _ in 0..10 {
        assert_eq!(engine.choose_uniform(8, Some(&only_three), None), 3);
    }
    assert_eq!(engine.rand_depth(), 10);
    assert_eq!(engine.serialize_current_sequence(), vec!["3"; 10].join("_"));
}

#[test]
fn test_nested_filter_rollback_keeps_trace_clean() {
    let mut selector = GeneratorSelector::new();
    let engine = selector.make_engine(StrategyTag::Default, 5);

    // The filter flips a coin of its own before deciding. Rejected
    // evaluations' coins must disappear with the rejected candidate.
    let filter = Nested(|candidate: u32, decisions: &mut dyn Decisions| {
        let _noise = decisions.weighted_boolean(50, None);
        candidate % 4 != 0
    });

    let v = engine.choose_uniform(12, Some(&filter), None);
    assert_eq!(v % 4, 0);
    assert_eq!(engine.rand_depth(), 2);

    let seq = engine.sequence();
    let seq = seq.borrow();
    assert_eq!(seq.len(), 2);
    assert!(seq.is_contiguous());
    assert_eq!(seq.get(0).map(|d| d.value), Some(v));
    assert_eq!(seq.get(1).map(|d| d.bound), Some(2));
}

#[test]
fn test_boolean_polarity_for_both_strategies() {
    for strategy in [StrategyTag::Default, StrategyTag::Dfs] {
        let mut selector = GeneratorSelector::new();
        let engine = selector.make_engine(strategy, 10);

        let zero_allowed = |v: u32| v == 1;
        let zero_rejected = |v: u32| v == 0;
        for percent in [0, 50, 100] {
            assert!(engine.weighted_boolean(percent, Some(&zero_allowed)), "{}", strategy);
            assert!(!engine.weighted_boolean(percent, Some(&zero_rejected)), "{}", strategy);
        }
    }
}

#[test]
fn test_boolean_filter_may_draw_for_both_strategies() {
    for strategy in [StrategyTag::Default, StrategyTag::Dfs] {
        let mut selector = GeneratorSelector::new();
        let engine = selector.make_engine(strategy, 77);

        let filter = Nested(|candidate: u32, decisions: &mut dyn Decisions| {
            decisions.choose_uniform(3, None, None);
            candidate == 0
        });
        assert!(!engine.weighted_boolean(50, Some(&filter)), "{}", strategy);
        assert_eq!(engine.rand_depth(), 3, "{}", strategy);

        let v = engine.choose_uniform(4, None, None);
        assert!(v < 4);
        assert_eq!(engine.rand_depth(), 4, "{}", strategy);
        assert!(engine.sequence().borrow().is_contiguous(), "{}", strategy);
    }
}

#[test]
fn test_dfs_enumeration_skips_wrapped_choices() {
    let mut selector = GeneratorSelector::new();
    let engine = selector.make_engine(StrategyTag::Dfs, 0);
    let dfs = engine.as_dfs_mut().unwrap();

    // Only 0 and 3 pass; starting from 1 or 2 the scan moves up to 3, and
    // starting from 4 it wraps back round to 0.
    let filter = |v: u32| v != 0 && v != 3;
    let mut fresh = Vec::new();
    loop {
        let v = dfs.choose_uniform(5, Some(&filter), None);
        if !dfs.is_revisit() {
            fresh.push(v);
        }
        if !dfs.advance() {
            break;
        }
    }
    assert_eq!(fresh, vec![0, 3]);
    assert_eq!(dfs.explored(), 2);
}

#[test]
fn test_engine_follows_raw_stream_of_its_seed() {
    let mut selector = GeneratorSelector::new();
    let engine = selector.make_engine(StrategyTag::Default, 2024);
    let mut raw = RawStream::seed(2024);

    for bound in [2, 3, 100, 1 << 20] {
        assert_eq!(engine.choose(bound), raw.draw_raw() % bound);
    }
}
