use hats_core::{HatAssignment, PuzzleConfig, RngHandle, SearchStrategy};
use hats_formula::Formula;
use hats_search::{
    exhaustive, run, score_assignment, search, search_batch, search_with, SearchOptions,
    SearchOutcome,
};

fn two(formula: &str) -> Formula {
    Formula::compile(formula, &PuzzleConfig::TWO).unwrap()
}

fn ten(formula: &str) -> Formula {
    Formula::compile(formula, &PuzzleConfig::TEN).unwrap()
}

#[test]
fn other_fails_at_zero_one_after_checking_zero_zero() {
    let formula = two("other");
    let first = score_assignment(&formula, &HatAssignment::from_index(0, &PuzzleConfig::TWO));
    assert_eq!(first.correct, vec![0, 1]);

    let report = exhaustive(&formula);
    assert_eq!(report.trials, 2);
    assert_eq!(
        report.outcome,
        SearchOutcome::Counterexample(HatAssignment::new(vec![0, 1], &PuzzleConfig::TWO).unwrap())
    );
    assert_eq!(report.outcome.to_wire(), vec![0, 1]);
}

#[test]
fn i_plus_other_survives_zero_one() {
    let formula = two("i + other");
    let score = score_assignment(
        &formula,
        &HatAssignment::new(vec![0, 1], &PuzzleConfig::TWO).unwrap(),
    );
    assert_eq!(score.guesses, vec![1, 1]);
    assert_eq!(score.correct, vec![1]);
    assert!(!score.is_counterexample());
}

#[test]
fn winning_two_person_rule_is_proven() {
    // Person 0 bets the hats match, person 1 bets they differ.
    let formula = two("other + i");
    let report = exhaustive(&formula);
    assert_eq!(report.trials, 4);
    assert!(report.proven);
    assert_eq!(report.strategy, SearchStrategy::Exhaustive);
    let SearchOutcome::NoCounterexampleFound(witness) = &report.outcome else {
        panic!("expected a clean verdict, got {:?}", report.outcome);
    };
    assert_eq!(witness.as_slice(), &[1, 1]);
    assert_eq!(report.outcome.to_wire(), vec![1, 1, -1]);
}

#[test]
fn two_person_search_ignores_rng_and_budget() {
    let formula = two("0");
    let options = SearchOptions {
        budget_ms: 0,
        seed: Some(1),
        max_trials: Some(1),
    };
    let mut rng = RngHandle::from_seed(9);
    let report = search_with(&formula, &options, &mut rng);
    assert_eq!(report.strategy, SearchStrategy::Exhaustive);
    // [0,0] has person 0 correct; [0,1] too; [1,0] has person 1 correct; [1,1] fails.
    assert_eq!(report.outcome.assignment().as_slice(), &[1, 1]);
    assert!(report.outcome.is_counterexample());
}

#[test]
fn canonical_ten_person_rule_never_fails() {
    let formula = ten("i - all");
    let options = SearchOptions {
        budget_ms: 10_000,
        seed: Some(2024),
        max_trials: Some(500),
    };
    let summary = search_batch(&formula, &options, 200);
    assert_eq!(summary.runs, 200);
    assert_eq!(summary.clean, 200);
    assert_eq!(summary.counterexamples, 0);
    assert!(summary.first_counterexample.is_none());
}

#[test]
fn constant_guess_is_refuted_quickly() {
    let formula = ten("5");
    for seed in 0..20 {
        let report = run(&formula, &SearchOptions::seeded(seed));
        let SearchOutcome::Counterexample(assignment) = &report.outcome else {
            panic!("seed {seed}: expected a counterexample");
        };
        assert!(assignment.as_slice().iter().all(|hat| *hat != 5));
        assert!(!report.proven);
        assert_eq!(report.outcome.to_wire().len(), 10);
    }
}

#[test]
fn seeded_searches_are_reproducible() {
    let formula = ten("l[1] + r[1]");
    let a = run(&formula, &SearchOptions::seeded(77));
    let b = run(&formula, &SearchOptions::seeded(77));
    assert_eq!(a.outcome, b.outcome);
    assert_eq!(a.trials, b.trials);
}

#[test]
fn string_entry_point_reports_compile_errors() {
    let err = search("i i", &PuzzleConfig::TEN).unwrap_err();
    assert_eq!(err.info().code, "missing-operator");
    let outcome = search("other", &PuzzleConfig::TWO).unwrap();
    assert_eq!(outcome.to_wire(), vec![0, 1]);
}

#[test]
fn outcomes_serialize_with_a_verdict_tag() {
    let outcome = exhaustive(&two("other")).outcome;
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["verdict"], "counterexample");
    assert_eq!(json["assignment"], serde_json::json!([0, 1]));
}

#[test]
fn long_literals_search_like_their_reduced_form() {
    let long = "9999999999 × 9999999999 × 9999999999 + i";
    let options = SearchOptions {
        budget_ms: 60_000,
        seed: Some(404),
        max_trials: Some(300),
    };
    let long_report = run(&ten(long), &options);
    let short_report = run(&ten("9 + i"), &options);
    assert_eq!(long_report.outcome, short_report.outcome);
    assert_eq!(long_report.trials, short_report.trials);

    let outcome = search("99999999999999999999", &PuzzleConfig::TEN).unwrap();
    let SearchOutcome::Counterexample(assignment) = outcome else {
        panic!("a constant guess is refutable");
    };
    assert!(assignment.as_slice().iter().all(|hat| *hat != 9));

    let two_long = search("1111111111111111111111 × other + i", &PuzzleConfig::TWO).unwrap();
    let two_short = search("other + i", &PuzzleConfig::TWO).unwrap();
    assert_eq!(two_long, two_short);
    assert_eq!(two_long.to_wire(), vec![1, 1, -1]);
}
