//! Stimulus coverage: exact, distinct, and repeatable vector sets.

use cellcheck_common::VectorPolicy;
use cellcheck_conformance::{all_vectors, clean_device, options, run_standard};
use cellcheck_diagnostics::DiagnosticCode;
use cellcheck_harness::{generate, StimulusError, StimulusSet, MAX_ARITY};
use std::collections::HashSet;

#[test]
fn exhaustive_covers_every_vector_once() {
    for k in 1..=8usize {
        let set = generate(k).unwrap();
        let seen: Vec<String> = set.iter().map(|v| v.to_string()).collect();
        assert_eq!(seen.len(), 1 << k);
        let distinct: HashSet<&String> = seen.iter().collect();
        assert_eq!(distinct.len(), 1 << k, "duplicates at arity {k}");
        let expected: Vec<String> = all_vectors(k as u32).map(|v| v.to_string()).collect();
        assert_eq!(seen, expected);
    }
}

#[test]
fn generation_is_restartable() {
    let set = generate(4).unwrap();
    let first: Vec<_> = set.iter().collect();
    let second: Vec<_> = set.iter().collect();
    assert_eq!(first, second);
    assert_eq!(generate(4).unwrap(), set);
}

#[test]
fn first_port_is_most_significant() {
    let set = generate(3).unwrap();
    let order: Vec<String> = set.iter().map(|v| v.to_string()).collect();
    assert_eq!(
        order,
        ["000", "001", "010", "011", "100", "101", "110", "111"]
    );
}

#[test]
fn arity_bounds() {
    assert_eq!(
        generate(0).unwrap_err(),
        StimulusError::Arity {
            arity: 0,
            max: MAX_ARITY
        }
    );
    assert!(matches!(
        generate(MAX_ARITY + 1),
        Err(StimulusError::Arity { .. })
    ));
    assert_eq!(generate(MAX_ARITY).unwrap().len(), 1u64 << MAX_ARITY);
}

#[test]
fn bounded_random_is_seeded() {
    let a = StimulusSet::bounded_random(6, 42, 10).unwrap();
    let b = StimulusSet::bounded_random(6, 42, 10).unwrap();
    let c = StimulusSet::bounded_random(6, 43, 10).unwrap();
    let indices =
        |s: &StimulusSet| -> Vec<u64> { s.iter().map(|v| v.to_index().unwrap()).collect() };
    assert_eq!(indices(&a), indices(&b));
    assert_ne!(indices(&a), indices(&c));
    let picked = indices(&a);
    assert_eq!(picked.len(), 10);
    assert!(picked.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn unknown_states_is_ternary() {
    let set = StimulusSet::unknown_states(3).unwrap();
    assert_eq!(set.len(), 27);
    let seen: HashSet<String> = set.iter().map(|v| v.to_string()).collect();
    assert_eq!(seen.len(), 27);
    assert!(seen.contains("X1X"));
}

#[test]
fn oversized_sample_runs_every_vector_with_warning() {
    let run = run_standard(
        &clean_device(),
        options(&["INV"], VectorPolicy::BoundedRandom { seed: 1, count: 10 }),
    )
    .unwrap();
    assert!(run.verdict.is_pass());
    assert_eq!(run.verdict.total_vectors(), 2);
    assert_eq!(run.warning_count, 1);
    assert_eq!(run.diagnostics[0].code, DiagnosticCode::VECTOR_COUNT_CLAMPED);
}
