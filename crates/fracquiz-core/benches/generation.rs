use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use fracquiz_core::{Level, QuizConfig, QuizEngine, Rational};

fn bench_generate_question(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_question");
    let engine = QuizEngine::new(QuizConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    for level in Level::ALL {
        group.bench_function(format!("level{level}"), |b| {
            b.iter(|| engine.generate_question(black_box(level), &mut rng))
        });
    }

    group.finish();
}

fn bench_decimal_to_fraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal_to_fraction");

    group.bench_function("0.375", |b| {
        b.iter(|| Rational::from_f64(black_box(0.375), black_box(1_000_000)))
    });

    group.bench_function("0.1", |b| {
        b.iter(|| Rational::from_f64(black_box(0.1), black_box(1_000_000)))
    });

    group.bench_function("pi", |b| {
        b.iter(|| Rational::from_f64(black_box(std::f64::consts::PI), black_box(1_000_000)))
    });

    group.finish();
}

fn bench_build_engine(c: &mut Criterion) {
    c.bench_function("build_engine", |b| {
        b.iter(|| QuizEngine::new(black_box(QuizConfig::default())))
    });
}

criterion_group!(
    benches,
    bench_generate_question,
    bench_decimal_to_fraction,
    bench_build_engine
);
criterion_main!(benches);
