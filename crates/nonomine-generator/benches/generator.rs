//! Benchmarks for mine board generation.
//!
//! This benchmark suite measures the performance of board generation using
//! `BoardGenerator` in plain and no-guess modes.
//!
//! # Benchmarks
//!
//! - **`generator_plain`**: Generates a 16x16 board with 40 mines without the
//!   solvability check. Measures mine placement and safe-zone handling alone.
//! - **`generator_no_guess`**: Generates the same board with `no_guess` set,
//!   so every candidate layout is solved logically before acceptance.
//!
//! # Test Data
//!
//! Uses three fixed seeds to ensure reproducibility while testing multiple cases:
//!
//! - **`seed_0`**: `c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1`
//! - **`seed_1`**: `a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3`
//! - **`seed_2`**: `1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef`
//!
//! Each seed produces a different board, allowing measurement across various
//! cases while maintaining reproducibility.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use nonomine_core::Position;
use nonomine_generator::{BoardGenerator, BoardSeed, GenerateParams};
use nonomine_solver::StrategySolver;

const SEEDS: [&str; 3] = [
    "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
    "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3",
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
];

fn params(no_guess: bool) -> GenerateParams {
    GenerateParams {
        width: 16,
        height: 16,
        bomb_count: 40,
        first_click: Position::new(8, 8),
        no_guess,
    }
}

fn bench_generator_plain(c: &mut Criterion) {
    let solver = StrategySolver::with_all_strategies();
    let generator = BoardGenerator::new(&solver);
    let params = params(false);

    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = BoardSeed::from_str(seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new("generator_plain", format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(&params, seed),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_generator_no_guess(c: &mut Criterion) {
    let solver = StrategySolver::with_all_strategies();
    let generator = BoardGenerator::new(&solver);
    let params = params(true);

    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = BoardSeed::from_str(seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new("generator_no_guess", format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(&params, seed),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(12));
    targets =
        bench_generator_plain,
        bench_generator_no_guess
);
criterion_main!(benches);
