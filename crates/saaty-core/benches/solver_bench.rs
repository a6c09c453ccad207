//! # Solver Benchmarks
//!
//! Performance benchmarks for matrix construction and weight derivation.
//!
//! Run with: `cargo bench -p saaty-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use saaty_core::{ComparisonMatrix, Criteria, CriteriaBounds, Intensity, Judgments, solve_matrix};
use std::hint::black_box;

/// Labels `C0..Cn` and a judgment cycling through the scale for every pair.
fn setup(size: usize) -> (Criteria, Judgments) {
    let labels: Vec<String> = (0..size).map(|i| format!("C{}", i)).collect();
    let criteria = Criteria::new(&labels, CriteriaBounds::default()).expect("criteria");

    let mut judgments = Judgments::new();
    for (index, pair) in criteria.pairs().enumerate() {
        let intensity = Intensity::ALL[index % Intensity::ALL.len()];
        judgments
            .insert(pair.row(), pair.column(), intensity)
            .expect("insert");
    }

    (criteria, judgments)
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_matrix_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_build");

    for size in &[2, 5, 10, 15] {
        let (criteria, judgments) = setup(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| ComparisonMatrix::build(black_box(&criteria), black_box(&judgments)));
        });
    }

    group.finish();
}

fn bench_solve_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_matrix");

    for size in &[2, 5, 10, 15] {
        let (criteria, judgments) = setup(*size);
        let matrix = ComparisonMatrix::build(&criteria, &judgments).expect("build");
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| solve_matrix(black_box(&matrix)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matrix_build, bench_solve_matrix);
criterion_main!(benches);
