// File: crates/algorithms/benches/bn254.rs
// Benchmarks for Fp254BNb field, group and pairing operations

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use isopair_algorithms::ec::bn254::{
    multi_miller_loop, pairing, Fp, Fp12, Fp2, G1Affine, G1Projective, G2Affine, G2Prepared,
    G2Projective, Gt, MillerLoopCoordinates, Scalar,
};
use isopair_algorithms::{ElementPool, EngineConfig, PairingEngine};
use isopair_api::Field;
use rand::rngs::OsRng;

/// Benchmark base and extension field arithmetic
fn bench_field_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bn254-field");

    group.bench_function("fp-multiplication", |b| {
        b.iter_batched(
            || (Fp::random(OsRng), Fp::random(OsRng)),
            |(x, y)| black_box(x * y),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("fp-inversion", |b| {
        b.iter_batched(
            || Fp::random(OsRng),
            |x| black_box(x.invert()),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("fp2-multiplication", |b| {
        b.iter_batched(
            || (Fp2::random(OsRng), Fp2::random(OsRng)),
            |(x, y)| black_box(x * y),
            BatchSize::SmallInput,
        )
    });

    // Two products summed before a single reduction
    group.bench_function("fp2-lazy-sum-of-products", |b| {
        b.iter_batched(
            || {
                (
                    Fp2::random(OsRng),
                    Fp2::random(OsRng),
                    Fp2::random(OsRng),
                    Fp2::random(OsRng),
                )
            },
            |(w, x, y, z)| black_box(w.mul_double(&x).add(&y.mul_double(&z)).reduce()),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("fp12-multiplication", |b| {
        b.iter_batched(
            || (Fp12::random(OsRng), Fp12::random(OsRng)),
            |(x, y)| black_box(x * y),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("fp12-squaring", |b| {
        b.iter_batched(
            || Fp12::random(OsRng),
            |x| black_box(x.square()),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("fp12-cyclotomic-squaring", |b| {
        b.iter_batched(
            || Gt::random(OsRng).value(),
            |x| black_box(x.cyclotomic_square()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

/// Benchmark G1 and G2 operations
fn bench_group_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bn254-groups");

    group.bench_function("g1-addition", |b| {
        b.iter_batched(
            || (G1Projective::random(OsRng), G1Projective::random(OsRng)),
            |(p, q)| black_box(p + q),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("g1-scalar-multiplication", |b| {
        b.iter_batched(
            || (G1Projective::random(OsRng), Scalar::random(OsRng)),
            |(p, k)| black_box(p * k),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("g2-scalar-multiplication", |b| {
        b.iter_batched(
            || (G2Projective::random(OsRng), Scalar::random(OsRng)),
            |(p, k)| black_box(p * k),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("g2-subgroup-check", |b| {
        b.iter_batched(
            || G2Projective::random(OsRng),
            |p| black_box(p.is_torsion_free()),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("g2-decompression", |b| {
        b.iter_batched(
            || G2Affine::from(G2Projective::random(OsRng)).to_compressed(),
            |bytes| black_box(G2Affine::from_compressed(&bytes)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

/// Benchmark the pairing and its phases
fn bench_pairing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bn254-pairing");
    group.sample_size(20);

    let p = G1Affine::from(G1Projective::random(OsRng));
    let q = G2Affine::from(G2Projective::random(OsRng));

    for coords in [MillerLoopCoordinates::Mixed, MillerLoopCoordinates::Affine] {
        group.bench_function(format!("g2-prepare-{}", coords), |b| {
            b.iter(|| black_box(G2Prepared::new(&q, coords)))
        });
    }

    let prepared = G2Prepared::from(q);
    group.bench_function("miller-loop", |b| {
        b.iter(|| black_box(multi_miller_loop(&[(&p, &prepared)])))
    });

    let f = multi_miller_loop(&[(&p, &prepared)]);
    group.bench_function("final-exponentiation", |b| {
        b.iter(|| black_box(f.final_exponentiation()))
    });

    group.bench_function("full-pairing", |b| b.iter(|| black_box(pairing(&q, &p))));

    let gt = pairing(&q, &p);
    group.bench_function("gt-exponentiation", |b| {
        b.iter_batched(
            || Scalar::random(OsRng),
            |k| black_box(gt.pow(&k)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

/// Benchmark engine-level operations with pooled buffers
fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("bn254-engine");
    group.sample_size(20);

    let mut engine = PairingEngine::new(EngineConfig::default());
    let p = G1Affine::from(G1Projective::random(OsRng));
    let q = G2Affine::from(G2Projective::random(OsRng));

    group.bench_function("prepare-and-recycle", |b| {
        b.iter(|| {
            let prepared = engine.prepare(&q);
            engine.recycle_prepared(black_box(prepared));
        })
    });

    group.bench_function("pool-take-recycle", |b| {
        let mut pool = ElementPool::default();
        b.iter(|| {
            let buf = pool.take::<Fp12>(8);
            pool.recycle(black_box(buf));
        })
    });

    let terms: Vec<(G1Affine, G2Affine)> = (0..4).map(|_| (p, q)).collect();
    group.bench_function("multi-pairing-4", |b| {
        b.iter(|| black_box(engine.multi_pairing(&terms)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_field_operations,
    bench_group_operations,
    bench_pairing,
    bench_engine
);
criterion_main!(benches);
