//! Commitment benchmarks.
//!
//! Metrics tracked:
//! - commitment construction (evaluation + tree reduction) for 8..1024 points
//! - proof generation for a single point
//! - strict verification of that proof

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fri_commit::{EvaluationCommitment, Polynomial, Verifier};

const MODULUS: u64 = 65_537;
const DOMAIN_SIZES: [usize; 4] = [8, 64, 256, 1024];

fn sample_polynomial() -> Polynomial {
    let coefficients: Vec<u64> = (0..32).map(|i| (i * i + 7) as u64).collect();
    Polynomial::from_canonical(coefficients, MODULUS).expect("valid modulus")
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit");
    let poly = sample_polynomial();

    for &n in &DOMAIN_SIZES {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("build", n), &n, |b, &n| {
            b.iter(|| EvaluationCommitment::new(black_box(&poly), n, MODULUS).expect("commit"));
        });
    }

    group.finish();
}

fn bench_prove(c: &mut Criterion) {
    let mut group = c.benchmark_group("prove");
    let poly = sample_polynomial();

    for &n in &DOMAIN_SIZES {
        let commitment = EvaluationCommitment::new(&poly, n, MODULUS).expect("commit");
        let point = (n / 3) as u64;
        group.bench_with_input(BenchmarkId::new("point_value", n), &point, |b, &point| {
            b.iter(|| commitment.prove_point_value(black_box(point)).expect("prove"));
        });
    }

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    let poly = sample_polynomial();
    let verifier = Verifier::additive(MODULUS).expect("verifier");

    for &n in &DOMAIN_SIZES {
        let commitment = EvaluationCommitment::new(&poly, n, MODULUS).expect("commit");
        let point = (n / 3) as u64;
        let value = poly.evaluate(point);
        let proof = commitment.prove_point_value(point).expect("prove");

        group.bench_with_input(BenchmarkId::new("strict", n), &proof, |b, proof| {
            b.iter(|| {
                let ok = verifier.verify(black_box(point), black_box(value), proof);
                assert!(ok);
                ok
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_commit, bench_prove, bench_verify);
criterion_main!(benches);
