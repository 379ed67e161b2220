use hats_core::{PuzzleConfig, RngHandle};
use hats_formula::Formula;
use hats_search::{exhaustive, randomized, SearchOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn search_bench(c: &mut Criterion) {
    let ten = Formula::compile("i - all", &PuzzleConfig::TEN).unwrap();
    let two = Formula::compile("i + other", &PuzzleConfig::TWO).unwrap();
    let options = SearchOptions {
        budget_ms: 60_000,
        seed: Some(7),
        max_trials: Some(10_000),
    };

    c.bench_function("randomized_10k_trials", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(7);
            black_box(randomized(&ten, &options, &mut rng))
        });
    });

    c.bench_function("exhaustive_two_person", |b| {
        b.iter(|| black_box(exhaustive(&two)));
    });
}

criterion_group!(benches, search_bench);
criterion_main!(benches);
