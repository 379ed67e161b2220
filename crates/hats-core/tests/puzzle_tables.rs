use hats_core::{HatAssignment, PuzzleConfig, PuzzleKind, RngHandle, SearchStrategy, VarRule};

#[test]
fn ten_person_table_resolves_neighbours_with_rotation() {
    let config = PuzzleConfig::TEN;
    let hats: Vec<u8> = (0..10).collect();
    let left = config.bracket('l').unwrap();
    let right = config.bracket('r').unwrap();

    assert_eq!(left.rule(3).resolve(8, &hats), Some(1));
    assert_eq!(right.rule(2).resolve(1, &hats), Some(9));
    assert_eq!(right.rule(9).resolve(0, &hats), Some(1));
}

#[test]
fn sum_of_others_skips_the_asking_person() {
    let hats = [1u8, 2, 3, 4];
    assert_eq!(VarRule::SumOfOthers.resolve(2, &hats), Some(7));
    assert_eq!(VarRule::OwnIndex.resolve(3, &hats), Some(3));
    assert_eq!(VarRule::OwnIndex.resolve(4, &hats), None);
}

#[test]
fn other_is_the_opposite_person_in_the_two_person_puzzle() {
    let config = PuzzleConfig::TWO;
    let other = config.variable("other").unwrap();
    assert_eq!(other.resolve(0, &[0, 1]), Some(1));
    assert_eq!(other.resolve(1, &[0, 1]), Some(0));
    assert!(config.variable("all").is_none());
    assert!(config.bracket('l').is_none());
}

#[test]
fn variants_declare_sizes_and_strategies() {
    assert_eq!(PuzzleConfig::TEN.assignment_space(), Some(10_000_000_000));
    assert_eq!(PuzzleConfig::TWO.assignment_space(), Some(4));
    assert_eq!(PuzzleConfig::TEN.strategy, SearchStrategy::Randomized);
    assert_eq!(PuzzleConfig::TWO.strategy, SearchStrategy::Exhaustive);
    assert!(PuzzleConfig::TWO.allows_digit('1'));
    assert!(!PuzzleConfig::TWO.allows_digit('2'));
    assert!(PuzzleConfig::TEN.allows_digit('9'));
}

#[test]
fn puzzle_kind_parses_from_cli_text() {
    assert_eq!("ten".parse::<PuzzleKind>().unwrap(), PuzzleKind::Ten);
    assert_eq!("2".parse::<PuzzleKind>().unwrap(), PuzzleKind::Two);
    let err = "seven".parse::<PuzzleKind>().unwrap_err();
    assert_eq!(err.info().code, "unknown-puzzle");
}

#[test]
fn assignments_enumerate_lexicographically() {
    let config = PuzzleConfig::TWO;
    let order: Vec<Vec<u8>> = (0..4)
        .map(|idx| HatAssignment::from_index(idx, &config).into_inner())
        .collect();
    assert_eq!(order, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
}

#[test]
fn assignments_reject_wrong_length_and_colour() {
    let config = PuzzleConfig::TWO;
    assert_eq!(
        HatAssignment::new(vec![0], &config).unwrap_err().info().code,
        "assignment-length"
    );
    assert_eq!(
        HatAssignment::new(vec![0, 2], &config).unwrap_err().info().code,
        "assignment-range"
    );
    assert_eq!(
        HatAssignment::parse("1, 0", &config).unwrap().as_slice(),
        &[1, 0]
    );
}

#[test]
fn random_assignments_stay_in_range() {
    let config = PuzzleConfig::TEN;
    let mut rng = RngHandle::from_seed(5);
    for _ in 0..200 {
        let assignment = HatAssignment::random(&config, &mut rng);
        assert_eq!(assignment.len(), 10);
        assert!(assignment.as_slice().iter().all(|hat| *hat < 10));
    }
}
