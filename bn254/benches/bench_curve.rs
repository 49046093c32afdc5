use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use da_bn254::{pairing, pairings_verify, Fr, G1, G2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_fr(rng: &mut SmallRng) -> Fr {
    Fr::from(rng.random::<u64>())
}

fn bench_g1_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("G1");

    let g1 = G1::generator();
    let mut rng = SmallRng::seed_from_u64(42);
    let scalar = random_fr(&mut rng);

    group.bench_function("scalar_mul", |b| {
        b.iter(|| black_box(g1).mul_scalar(black_box(scalar)));
    });

    group.finish();
}

fn bench_g1_msm(c: &mut Criterion) {
    let mut group = c.benchmark_group("G1_MSM");

    let g1 = G1::generator();
    let mut rng = SmallRng::seed_from_u64(42);

    // Benchmark different sizes of MSM
    for size in [1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024].iter() {
        let points: Vec<G1> = (0..*size)
            .map(|_| g1.mul_scalar(random_fr(&mut rng)))
            .collect();
        let scalars: Vec<Fr> = (0..*size).map(|_| random_fr(&mut rng)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| G1::multi_exp(black_box(&points), black_box(&scalars)));
        });
    }

    group.finish();
}

fn bench_pairing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pairing");

    let g1 = G1::generator();
    let g2 = G2::generator();
    let mut rng = SmallRng::seed_from_u64(42);

    group.bench_function("single_pairing", |b| {
        b.iter(|| pairing(black_box(g1), black_box(g2)));
    });

    let a = random_fr(&mut rng);
    let b_scalar = random_fr(&mut rng);
    let left = g1.mul_scalar(a * b_scalar);
    let right1 = g1.mul_scalar(a);
    let right2 = g2.mul_scalar(b_scalar);

    group.bench_function("pairings_verify", |b| {
        b.iter(|| {
            pairings_verify(
                black_box(left),
                black_box(g2),
                black_box(right1),
                black_box(right2),
            )
        });
    });

    group.finish();
}

criterion_group!(curve_benches, bench_g1_operations, bench_g1_msm, bench_pairing);
criterion_main!(curve_benches);
