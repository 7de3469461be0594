use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shard_recover::bigint::BigInt;
use shard_recover::dealer::{deal, DealOptions};
use shard_recover::decode::decode;
use shard_recover::interpolate::ExactInterpolator;
use shard_recover::share::Point;
use shard_recover::solver::{solve, ConsensusSolver};

fn dealt_points(threshold: usize, shares: usize) -> Vec<Point> {
    let options = DealOptions {
        threshold,
        shares,
        base: None,
        faulty: [shares as u64].into_iter().collect(),
        bound: BigInt::from(1_000_000u64),
    };
    let secret = BigInt::from_decimal_str("79836264049851").unwrap();
    deal(&secret, &options).unwrap().points().unwrap()
}

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode", |b| {
        let digits = "2122212201122002221120200210011020220200";
        b.iter(|| decode(black_box(digits), black_box(3)))
    });
}

fn bench_solve_reference(c: &mut Criterion) {
    c.bench_function("solve_reference", |b| {
        let points = dealt_points(5, 10);
        b.iter(|| solve(black_box(&points), black_box(5)))
    });
}

fn bench_solve_exact(c: &mut Criterion) {
    c.bench_function("solve_exact", |b| {
        let points = dealt_points(5, 10);
        let solver = ConsensusSolver::new(ExactInterpolator);
        b.iter(|| solver.solve(black_box(&points), black_box(5)))
    });
}

criterion_group!(benches, bench_decode, bench_solve_reference, bench_solve_exact);
criterion_main!(benches);
