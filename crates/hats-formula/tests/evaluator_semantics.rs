use hats_core::{HatAssignment, PuzzleConfig, RngHandle};
use hats_formula::{evaluate_guess, validate, Formula, ERROR};
use proptest::prelude::*;

#[test]
fn i_minus_all_matches_the_closed_form() {
    let config = PuzzleConfig::TEN;
    let formula = Formula::compile("i - all", &config).unwrap();
    let mut rng = RngHandle::from_seed(11);
    for _ in 0..500 {
        let assignment = HatAssignment::random(&config, &mut rng);
        let hats = assignment.as_slice();
        let total: i64 = hats.iter().map(|h| i64::from(*h)).sum();
        for person in 0..10 {
            let others = total - i64::from(hats[person]);
            let expected = (person as i64 - others).rem_euclid(10);
            assert_eq!(formula.guess(hats, person), expected);
        }
    }
}

#[test]
fn i_is_the_person_index_not_the_hat() {
    let config = PuzzleConfig::TEN;
    let hats = [7u8; 10];
    for person in 0..10 {
        assert_eq!(evaluate_guess("i", &config, &hats, person), person as i64);
    }
}

#[test]
fn brackets_rotate_with_the_asking_person() {
    let config = PuzzleConfig::TEN;
    let hats: Vec<u8> = vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    assert_eq!(evaluate_guess("l[1]", &config, &hats, 9), 0);
    assert_eq!(evaluate_guess("l[3]", &config, &hats, 2), 5);
    assert_eq!(evaluate_guess("r[1]", &config, &hats, 0), 9);
    assert_eq!(evaluate_guess("r[2]", &config, &hats, 5), 3);
    assert_eq!(evaluate_guess("l[3] - r[2]", &config, &hats, 5), 5);
}

#[test]
fn two_person_guesses() {
    let config = PuzzleConfig::TWO;
    assert_eq!(evaluate_guess("other", &config, &[0, 1], 0), 1);
    assert_eq!(evaluate_guess("other", &config, &[0, 1], 1), 0);
    assert_eq!(evaluate_guess("i + other", &config, &[0, 1], 0), 1);
    assert_eq!(evaluate_guess("i + other", &config, &[0, 1], 1), 1);
}

#[test]
fn precedence_and_associativity() {
    let config = PuzzleConfig::TEN;
    let hats = [0u8; 10];
    assert_eq!(evaluate_guess("1 + 2 × 3", &config, &hats, 0), 7);
    assert_eq!(evaluate_guess("(1 + 2) × 3", &config, &hats, 0), 9);
    assert_eq!(evaluate_guess("9 - 3 - 1", &config, &hats, 0), 5);
    assert_eq!(evaluate_guess("1 - 3", &config, &hats, 0), 8);
}

#[test]
fn failures_collapse_to_the_sentinel() {
    let config = PuzzleConfig::TEN;
    let hats = [1u8; 10];
    assert_eq!(evaluate_guess("i +", &config, &hats, 0), ERROR);
    assert_eq!(evaluate_guess("i", &config, &hats, 10), ERROR);
    assert_eq!(evaluate_guess("i", &config, &hats[..9], 0), ERROR);
}

#[test]
fn long_literals_guess_like_their_reduced_form() {
    let config = PuzzleConfig::TEN;
    let mut rng = RngHandle::from_seed(31);
    let pairs = [
        ("99999999999999999999", "9"),
        ("9999999999 × 9999999999 × 9999999999 + i", "9 + i"),
        ("12345678901234567890123 - all", "3 - all"),
    ];
    for (long, short) in pairs {
        assert!(validate(long, &config).is_valid, "{long}");
        let long = Formula::compile(long, &config).unwrap();
        let short = Formula::compile(short, &config).unwrap();
        for _ in 0..50 {
            let assignment = HatAssignment::random(&config, &mut rng);
            for person in 0..10 {
                let guess = long.guess(assignment.as_slice(), person);
                assert_ne!(guess, ERROR);
                assert_eq!(guess, short.guess(assignment.as_slice(), person));
            }
        }
    }
    let two = PuzzleConfig::TWO;
    assert_eq!(evaluate_guess("1111111111111111111111 × other", &two, &[0, 1], 0), 1);
}

#[test]
fn compiled_formula_renders_canonically() {
    let formula = Formula::compile(" ( i+1 )×2 ", &PuzzleConfig::TEN).unwrap();
    assert_eq!(formula.to_string(), "(i + 1) × 2");
    assert_eq!(formula.tokens().len(), 5);
    assert_eq!(formula.source(), " ( i+1 )×2 ");
}

#[test]
fn compile_errors_carry_category_and_formula() {
    let err = Formula::compile("l[0]", &PuzzleConfig::TEN).unwrap_err();
    assert_eq!(err.info().code, "invalid-bracket-content");
    assert_eq!(err.info().context.get("formula").map(String::as_str), Some("l[0]"));
}

proptest! {
    #[test]
    fn guesses_stay_in_range(
        formula in prop::sample::select(vec![
            "i - all", "5", "l[1] × r[9] + i", "(all - 3) × (i + l[4])", "0 - all × 7",
        ]),
        hats in prop::collection::vec(0u8..10, 10),
        person in 0usize..10,
    ) {
        let guess = evaluate_guess(formula, &PuzzleConfig::TEN, &hats, person);
        prop_assert!((0..10).contains(&guess));
    }

    #[test]
    fn any_input_yields_digit_or_sentinel(
        formula in "[il0-9+\\-×()\\[\\]]{1,10}",
        hats in prop::collection::vec(0u8..10, 10),
        person in 0usize..12,
    ) {
        let guess = evaluate_guess(&formula, &PuzzleConfig::TEN, &hats, person);
        prop_assert!(guess == ERROR || (0..10).contains(&guess));
    }
}
